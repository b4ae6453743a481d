//! Browser binding
//!
//! Wires the player to DOM media elements and WebXR, and exports a
//! [`WebPlayer`] to JavaScript. The page owns the canvas, the rendering
//! and the `requestAnimationFrame` / `setAnimationLoop` scheduler; it calls
//! [`WebPlayer::frame`] and reads back the camera and fade state.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::app::{ControlEvent, MouseButton, MuteButtonIcon, PlayButtonIcon, Player};
use crate::audio::AudioTrack;
use crate::config::PlayerConfig;
use crate::errors::{PlayerError, Result};
use crate::renderer::HeadlessRenderer;
use crate::xr::{SessionRequest, XrSessionMode, XrSystem};

fn js_error(e: &PlayerError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

// ============================================================================
// Audio
// ============================================================================

/// `<audio>` element as the soundtrack.
pub struct HtmlAudioTrack {
    element: HtmlAudioElement,
}

impl HtmlAudioTrack {
    #[must_use]
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }

    /// Looks the element up by DOM id.
    pub fn from_element_id(id: &str) -> Result<Self> {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| PlayerError::AudioError(format!("no element with id '{id}'")))?
            .dyn_into::<HtmlAudioElement>()
            .map_err(|_| PlayerError::AudioError(format!("element '{id}' is not <audio>")))?;
        Ok(Self::new(element))
    }
}

impl AudioTrack for HtmlAudioTrack {
    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlayerError::AudioError(format!("{e:?}")))?;
        // Autoplay rejections arrive asynchronously.
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Audio playback was rejected: {e:?}");
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            log::warn!("Audio pause failed: {e:?}");
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }
}

// ============================================================================
// WebXR
// ============================================================================

/// `navigator.xr`, probed dynamically.
///
/// `requestSession` resolves asynchronously; its outcome is parked in a
/// shared slot until the player polls it on the next frame.
#[derive(Debug, Default, Clone)]
pub struct NavigatorXr {
    outcome: Rc<RefCell<Option<std::result::Result<(), String>>>>,
}

impl NavigatorXr {
    fn xr() -> Option<JsValue> {
        let navigator = web_sys::window()?.navigator();
        let xr = Reflect::get(&navigator, &JsValue::from_str("xr")).ok()?;
        (!xr.is_undefined() && !xr.is_null()).then_some(xr)
    }
}

impl XrSystem for NavigatorXr {
    fn is_available(&self) -> bool {
        Self::xr().is_some()
    }

    fn request_session(&mut self, mode: XrSessionMode) -> Result<SessionRequest> {
        let xr = Self::xr().ok_or(PlayerError::XrUnavailable)?;
        let request = Reflect::get(&xr, &JsValue::from_str("requestSession"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| PlayerError::XrSessionError("requestSession missing".to_string()))?;
        let promise: Promise = request
            .call1(&xr, &JsValue::from_str(mode.as_str()))
            .map_err(|e| PlayerError::XrSessionError(format!("{e:?}")))?
            .dyn_into()
            .map_err(|_| PlayerError::XrSessionError("requestSession returned no promise".to_string()))?;

        self.outcome.borrow_mut().take();
        let slot = Rc::clone(&self.outcome);
        spawn_local(async move {
            let outcome = match JsFuture::from(promise).await {
                Ok(_) => Ok(()),
                Err(e) => {
                    log::error!("XR session request failed: {e:?}");
                    alert("Could not start the AR session");
                    Err(format!("{e:?}"))
                }
            };
            *slot.borrow_mut() = Some(outcome);
        });
        Ok(SessionRequest::Pending)
    }

    fn poll_session(&mut self) -> Option<Result<()>> {
        let outcome = self.outcome.borrow_mut().take()?;
        Some(outcome.map_err(PlayerError::XrSessionError))
    }
}

// ============================================================================
// Exported player
// ============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    crate::logging::init();
}

#[wasm_bindgen]
pub struct WebPlayer {
    inner: Player<HeadlessRenderer>,
}

#[wasm_bindgen]
impl WebPlayer {
    /// Creates a player from a JSON config (defaults when omitted).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> std::result::Result<WebPlayer, JsValue> {
        let config = match config_json {
            Some(json) => PlayerConfig::from_json_str(&json).map_err(|e| js_error(&e))?,
            None => PlayerConfig::default(),
        };
        let renderer = HeadlessRenderer::new(config.render);
        let audio = config.audio.clone();
        let mut inner = Player::new(config, renderer).with_xr(Box::new(NavigatorXr::default()));

        if let Some(audio) = audio {
            match HtmlAudioTrack::from_element_id(&audio.element_id) {
                Ok(track) => inner = inner.with_audio(Box::new(track)),
                Err(e) => log::warn!("Soundtrack disabled: {e}"),
            }
        }
        Ok(Self { inner })
    }

    /// Installs a `.glb` the page has fetched.
    pub fn load_glb(&mut self, bytes: &[u8], label: &str) -> std::result::Result<(), JsValue> {
        self.inner.load_model_bytes(bytes, label).map_err(|e| js_error(&e))
    }

    /// Installs a Radiance `.hdr` environment the page has fetched.
    pub fn load_hdr(&mut self, bytes: &[u8], label: &str) -> std::result::Result<(), JsValue> {
        let map = crate::assets::decode_hdr(bytes, label).map_err(|e| js_error(&e))?;
        self.inner.set_environment_map(map);
        Ok(())
    }

    /// Runs one frame; returns the playback position in seconds.
    pub fn frame(&mut self, delta: f32) -> f32 {
        self.inner.frame(delta).current_time
    }

    pub fn toggle_play(&mut self) -> bool {
        self.inner.toggle_play()
    }

    /// Slider input: raw slider value in hundredths of a second.
    pub fn scrub(&mut self, slider_value: f32) -> f32 {
        let fraction = self.inner.panel().timeline.fraction(slider_value);
        self.inner.scrub(fraction)
    }

    pub fn set_speed(&mut self, speed: f32) -> std::result::Result<(), JsValue> {
        self.inner.handle(ControlEvent::SetSpeed(speed)).map_err(|e| js_error(&e))
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.inner.toggle_mute()
    }

    /// "Enter AR" button. Failures are shown to the user.
    pub fn enter_ar(&mut self) -> bool {
        match self.inner.enter_ar() {
            Ok(_) => true,
            Err(PlayerError::XrUnavailable) => {
                alert("WebXR not supported");
                false
            }
            Err(e) => {
                alert(&e.to_string());
                false
            }
        }
    }

    pub fn on_xr_session_end(&mut self) {
        self.inner.on_xr_session_end();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    /// Pointer input; `button` follows `MouseEvent.button` (0 left, 1
    /// middle, 2 right).
    pub fn pointer_button(&mut self, button: u8, pressed: bool) {
        let button = match button {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => return,
        };
        self.inner.input_mut().handle_mouse_button(button, pressed);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.input_mut().handle_cursor_move(x, y);
    }

    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) {
        self.inner.input_mut().handle_pixel_scroll(delta_x, delta_y);
    }

    // ------------------------------------------------------------------------
    // State read back by the page
    // ------------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.inner.opacity()
    }

    #[wasm_bindgen(getter)]
    pub fn current_time(&self) -> f32 {
        self.inner.clock().current_time()
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f32 {
        self.inner.clock().duration()
    }

    #[wasm_bindgen(getter)]
    pub fn is_playing(&self) -> bool {
        self.inner.clock().is_playing()
    }

    #[wasm_bindgen(getter)]
    pub fn timeline_max(&self) -> f32 {
        self.inner.panel().timeline.max
    }

    #[wasm_bindgen(getter)]
    pub fn timeline_value(&self) -> f32 {
        self.inner.panel().timeline.value
    }

    /// Material icon name for the play button.
    #[wasm_bindgen(getter)]
    pub fn play_icon(&self) -> String {
        match self.inner.panel().play_icon {
            PlayButtonIcon::Play => "play_arrow",
            PlayButtonIcon::Pause => "pause",
        }
        .to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mute_icon(&self) -> String {
        match self.inner.panel().mute_icon {
            MuteButtonIcon::VolumeUp => "volume_up",
            MuteButtonIcon::VolumeMute => "volume_off",
        }
        .to_string()
    }

    /// Column-major view-projection matrix for the page's renderer.
    pub fn view_projection(&self) -> Vec<f32> {
        self.inner.camera.view_projection_matrix().to_cols_array().to_vec()
    }
}
