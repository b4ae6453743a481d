#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod errors;
pub mod fade;
pub mod logging;
pub mod playback;
pub mod renderer;
pub mod scene;
pub mod utils;
pub mod xr;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, Binder, LoopMode};
pub use app::{ControlEvent, FrameChanges, FrameReport, Player, PlayerStatus};
pub use assets::{GltfDocument, GltfLoader, LoadedModel};
pub use audio::{AudioSync, AudioTrack};
pub use config::PlayerConfig;
pub use errors::{PlayerError, Result};
pub use fade::{FadeCurve, OpacityKeyframer};
pub use playback::{AnimationDriver, PlaybackClock, PlaybackState};
pub use renderer::{HeadlessRenderer, Renderer};
pub use scene::{Camera, Light, Node, Scene};
pub use utils::orbit_control::OrbitControls;
pub use xr::{ArSession, PresentationMode, SessionRequest, XrSystem};
