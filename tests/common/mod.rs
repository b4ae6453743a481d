//! Shared fixtures for the integration tests.
//!
//! The model is a self-contained glTF (buffer as a base64 data URI):
//!
//! - `Body` uses the fade material through mesh `Glass`
//! - `Frame` (translated to y = 5) uses mesh `Housing`, whose second
//!   primitive also uses the fade material
//! - `Lens` is a child of `Frame` and reuses mesh `Glass`
//! - clip `Exploded View` moves `Body` from x = 0 to x = 10 over 10 s

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use myth_player::audio::AudioTrack;
use myth_player::errors::{PlayerError, Result};
use myth_player::xr::{SessionRequest, XrSessionMode, XrSystem};

pub const EPSILON: f32 = 1e-4;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Routes `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const BUFFER_URI: &str = "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAIEEAAAAAAAAAAAAAAAAAACBBAAAAAAAAAAA=";

fn model_json(with_animation: bool) -> String {
    let animations = if with_animation {
        r#","animations": [{
            "name": "Exploded View",
            "samplers": [{ "input": 1, "output": 2, "interpolation": "LINEAR" }],
            "channels": [{ "sampler": 0, "target": { "node": 0, "path": "translation" } }]
        }]"#
    } else {
        ""
    };

    format!(
        r#"{{
        "asset": {{ "version": "2.0" }},
        "scene": 0,
        "scenes": [{{ "name": "Stage", "nodes": [0, 1] }}],
        "nodes": [
            {{ "name": "Body", "mesh": 0 }},
            {{ "name": "Frame", "mesh": 1, "translation": [0.0, 5.0, 0.0], "children": [2] }},
            {{ "name": "Lens", "mesh": 0 }}
        ],
        "meshes": [
            {{ "name": "Glass", "primitives": [{{ "attributes": {{ "POSITION": 0 }}, "material": 0 }}] }},
            {{ "name": "Housing", "primitives": [
                {{ "attributes": {{ "POSITION": 0 }}, "material": 1 }},
                {{ "attributes": {{ "POSITION": 0 }}, "material": 0 }}
            ] }}
        ],
        "materials": [
            {{
                "name": "Farbe weiß transparent",
                "pbrMetallicRoughness": {{ "baseColorFactor": [1.0, 1.0, 1.0, 0.4] }},
                "alphaMode": "BLEND"
            }},
            {{
                "name": "Metal",
                "pbrMetallicRoughness": {{
                    "baseColorFactor": [0.5, 0.5, 0.5, 1.0],
                    "metallicFactor": 0.9,
                    "roughnessFactor": 0.2
                }}
            }}
        ],
        "buffers": [{{ "byteLength": 68, "uri": "{BUFFER_URI}" }}],
        "bufferViews": [
            {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
            {{ "buffer": 0, "byteOffset": 36, "byteLength": 8 }},
            {{ "buffer": 0, "byteOffset": 44, "byteLength": 24 }}
        ],
        "accessors": [
            {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
               "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
            {{ "bufferView": 1, "componentType": 5126, "count": 2, "type": "SCALAR",
               "min": [0.0], "max": [10.0] }},
            {{ "bufferView": 2, "componentType": 5126, "count": 2, "type": "VEC3" }}
        ]{animations}
    }}"#
    )
}

/// The animated fixture model.
pub fn model_gltf() -> String {
    model_json(true)
}

/// Same model without any animation.
pub fn static_model_gltf() -> String {
    model_json(false)
}

/// Writes `contents` to a unique file in the temp directory.
pub fn write_temp(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("myth-player-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// A 2x2 Radiance HDR, uncompressed scanlines.
///
/// Texels: (1, 0.5, 0.25), (0.5, 0.5, 0.5), (0, 0, 0), (2, 2, 2).
pub fn hdr_bytes() -> Vec<u8> {
    let mut bytes = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y 2 +X 2\n".to_vec();
    bytes.extend_from_slice(&[128, 64, 32, 129]);
    bytes.extend_from_slice(&[128, 128, 128, 128]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&[128, 128, 128, 130]);
    bytes
}

// ============================================================================
// Audio and XR doubles
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Play,
    Pause,
    SetTime(f64),
    Rate(f64),
    Muted(bool),
}

/// Records every call; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub calls: Rc<RefCell<Vec<AudioCall>>>,
    pub reject_play: bool,
    time: f64,
}

impl RecordingAudio {
    /// A track whose `play` fails, like a browser blocking autoplay.
    pub fn rejecting() -> Self {
        Self {
            reject_play: true,
            ..Self::default()
        }
    }

    pub fn take(&self) -> Vec<AudioCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl AudioTrack for RecordingAudio {
    fn play(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(AudioCall::Play);
        if self.reject_play {
            return Err(PlayerError::AudioError("autoplay blocked".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(AudioCall::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.time = seconds;
        self.calls.borrow_mut().push(AudioCall::SetTime(seconds));
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.calls.borrow_mut().push(AudioCall::Rate(rate));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.borrow_mut().push(AudioCall::Muted(muted));
    }
}

/// XR runtime with a fixed availability; counts session requests.
///
/// With `deferred` set, requests stay pending until [`FakeXr::resolve`]
/// hands in the outcome, like a browser answering `requestSession` later.
#[derive(Debug, Clone, Default)]
pub struct FakeXr {
    pub available: bool,
    pub deferred: bool,
    pub requests: Rc<RefCell<Vec<XrSessionMode>>>,
    outcome: Rc<RefCell<Option<Result<()>>>>,
}

impl FakeXr {
    pub fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn deferred() -> Self {
        Self {
            available: true,
            deferred: true,
            ..Self::default()
        }
    }

    pub fn resolve(&self, outcome: Result<()>) {
        *self.outcome.borrow_mut() = Some(outcome);
    }
}

impl XrSystem for FakeXr {
    fn is_available(&self) -> bool {
        self.available
    }

    fn request_session(&mut self, mode: XrSessionMode) -> Result<SessionRequest> {
        self.requests.borrow_mut().push(mode);
        if self.deferred {
            Ok(SessionRequest::Pending)
        } else {
            Ok(SessionRequest::Started)
        }
    }

    fn poll_session(&mut self) -> Option<Result<()>> {
        self.outcome.borrow_mut().take()
    }
}
