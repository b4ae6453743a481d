use std::path::Path;
use std::sync::Arc;

use bitflags::bitflags;

use crate::animation::{AnimationAction, AnimationMixer, Binder};
use crate::app::input::Input;
use crate::app::ui::{ControlEvent, ControlPanel, SpeedOptions, TimelineSlider};
use crate::assets::{GltfDocument, GltfLoader, LoadStatus, LoadTicket, LoadedModel, load_hdr_environment};
use crate::audio::{AudioSync, AudioTrack};
use crate::config::PlayerConfig;
use crate::errors::{PlayerError, Result};
use crate::fade::OpacityKeyframer;
use crate::playback::{PlaybackClock, SceneAnimator};
use crate::renderer::Renderer;
use crate::scene::light::color_from_hex;
use crate::scene::{Background, Camera, EquirectMap, Light, Scene};
use crate::utils::orbit_control::OrbitControls;
use crate::utils::time::{Clock, SystemTimeSource, TimeSource};
use crate::xr::{ArSession, NoXr, PresentationMode, XrSystem};

bitflags! {
    /// What changed during one [`Player::frame`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FrameChanges: u32 {
        const MODEL_LOADED    = 1 << 0;
        const LOAD_FAILED     = 1 << 1;
        const ADVANCED        = 1 << 2;
        const LOOPED          = 1 << 3;
        const OPACITY_CHANGED = 1 << 4;
        const TIMELINE_RESET  = 1 << 5;
        const PRESENTATION_CHANGED = 1 << 6;
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Wall delta handed to the frame.
    pub delta: f32,
    /// Playback delta actually applied (`delta * speed`, 0 while paused).
    pub scaled_delta: f32,
    pub current_time: f32,
    pub frame: f32,
    pub opacity: f32,
    pub changes: FrameChanges,
}

/// Lifecycle of the model slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    Empty,
    Loading(String),
    Ready,
    /// Load failed; playback never starts.
    Failed(String),
}

/// The animation player.
///
/// Owns the scene, camera, orbit controls and the playback clock, and is
/// driven by a scheduler calling [`frame`](Self::frame) once per display
/// refresh (or per XR frame while presenting immersively). Control events
/// arrive through [`handle`](Self::handle).
pub struct Player<R: Renderer, S: TimeSource + Clone = SystemTimeSource> {
    config: PlayerConfig,

    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    input: Input,
    renderer: R,

    mixer: AnimationMixer,
    clock: PlaybackClock<S>,
    frame_clock: Clock<S>,
    time_source: S,
    keyframer: OpacityKeyframer,
    opacity: f32,

    audio: AudioSync,
    ar: Option<ArSession>,
    panel: ControlPanel,

    model: Option<LoadedModel>,
    pending: Option<LoadTicket<GltfDocument>>,
    status: PlayerStatus,
}

impl<R: Renderer, S: TimeSource + Clone> std::fmt::Debug for Player<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("status", &self.status)
            .field("state", self.clock.state())
            .field("duration", &self.clock.duration())
            .field("audio", &self.audio)
            .field("ar", &self.ar)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> Player<R, SystemTimeSource> {
    #[must_use]
    pub fn new(config: PlayerConfig, renderer: R) -> Self {
        Self::with_time_source(config, renderer, SystemTimeSource::new())
    }
}

impl<R: Renderer, S: TimeSource + Clone> Player<R, S> {
    /// Builds the stage (camera, controls, lights) without a model.
    #[must_use]
    pub fn with_time_source(config: PlayerConfig, renderer: R, source: S) -> Self {
        let cam = &config.camera;
        let mut camera = Camera::new_perspective(cam.fov, 1.0, cam.near, cam.far);
        camera.transform.position = cam.position();
        let mut controls = OrbitControls::from_position(cam.target(), cam.position());
        controls.update(&mut camera, &Input::default(), 0.0);

        let mut scene = Scene::new();
        add_lights(&mut scene, &config);

        let speeds = SpeedOptions::new(config.speed_options.clone());
        let panel = ControlPanel::new(speeds, config.audio.is_some(), config.ar_enabled);
        let ar = config.ar_enabled.then(|| ArSession::new(Box::new(NoXr)));

        log::info!(
            "Player created (audio: {}, ar: {})",
            config.audio.is_some(),
            config.ar_enabled
        );

        Self {
            keyframer: OpacityKeyframer::new(config.fade),
            opacity: config.fade.opaque,
            config,
            scene,
            camera,
            controls,
            input: Input::new(),
            renderer,
            mixer: AnimationMixer::new(),
            clock: PlaybackClock::with_time_source(0.0, source.clone()),
            frame_clock: Clock::new(source.clone()),
            time_source: source,
            audio: AudioSync::default(),
            ar,
            panel,
            model: None,
            pending: None,
            status: PlayerStatus::Empty,
        }
    }

    /// Attaches the soundtrack, carrying over the current speed and mute
    /// state.
    #[must_use]
    pub fn with_audio(mut self, track: Box<dyn AudioTrack>) -> Self {
        self.audio.attach(track, self.clock.speed(), self.clock.is_muted());
        self.panel.audio_controls = true;
        self
    }

    /// Uses `system` as the XR runtime. Only meaningful when AR is enabled
    /// in the config.
    #[must_use]
    pub fn with_xr(mut self, system: Box<dyn XrSystem>) -> Self {
        if self.config.ar_enabled {
            self.ar = Some(ArSession::new(system));
        } else {
            log::debug!("XR runtime ignored: AR is disabled in the config");
        }
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &PlaybackClock<S> {
        &self.clock
    }

    #[must_use]
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    #[must_use]
    pub fn status(&self) -> &PlayerStatus {
        &self.status
    }

    #[must_use]
    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Pointer state fed by the platform layer.
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// Opacity applied to the fade materials on the last frame.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[must_use]
    pub fn presentation(&self) -> PresentationMode {
        self.ar.as_ref().map_or(PresentationMode::Screen, ArSession::mode)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == PlayerStatus::Ready
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Loads and installs the model synchronously.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<&LoadedModel> {
        let doc = GltfDocument::from_path(path).inspect_err(|e| self.fail(e))?;
        self.install(&doc)
    }

    /// Parses and installs an in-memory `.glb`.
    pub fn load_model_bytes(&mut self, bytes: &[u8], label: &str) -> Result<()> {
        let doc = GltfDocument::from_slice(bytes, label).inspect_err(|e| self.fail(e))?;
        self.install(&doc).map(|_| ())
    }

    /// Starts a background parse of the model; [`frame`](Self::frame)
    /// installs it once ready.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn begin_load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let ticket = crate::assets::spawn_load(path.as_ref())?;
        self.status = PlayerStatus::Loading(ticket.label().to_string());
        self.pending = Some(ticket);
        Ok(())
    }

    /// Inserts a parsed document into a fresh stage and prepares playback.
    ///
    /// Afterwards the player is paused at time 0, the play icon is shown
    /// and the soundtrack is paused. On failure the stage is left empty and
    /// the player reports [`PlayerStatus::Failed`].
    pub fn install(&mut self, doc: &GltfDocument) -> Result<&LoadedModel> {
        match self.prepare(doc) {
            Ok(model) => {
                self.status = PlayerStatus::Ready;
                Ok(&*self.model.insert(model))
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn prepare(&mut self, doc: &GltfDocument) -> Result<LoadedModel> {
        if doc.animation_count() == 0 {
            return Err(PlayerError::NoAnimation(doc.label.clone()));
        }
        self.reset_stage();

        let model = GltfLoader::load(doc, &mut self.scene, &self.config.fade_material)?;
        let Some(clip) = model.primary_clip().map(Arc::clone) else {
            return Err(PlayerError::NoAnimation(doc.label.clone()));
        };

        let bindings = Binder::bind(&self.scene, model.root, &clip);
        let mut mixer = AnimationMixer::new();
        mixer.add_action(AnimationAction::new(Arc::clone(&clip)).with_bindings(bindings));
        self.mixer = mixer;

        let mut clock = PlaybackClock::with_time_source(clip.duration, self.time_source.clone());
        clock.set_speed(self.panel.speeds.selected())?;
        clock.set_muted(self.clock.is_muted());
        self.clock = clock;

        let mut driver = SceneAnimator::new(&mut self.mixer, &mut self.scene);
        self.clock.seek(0.0, &mut driver);

        self.panel.timeline = TimelineSlider::for_duration(clip.duration);
        self.panel.show_playing(false);
        self.audio.on_ready();
        self.opacity = self
            .keyframer
            .update(&mut self.scene, 0.0, self.clock.duration());

        log::info!(
            "Model {} ready: clip '{}' ({:.2}s), {} fade meshes",
            doc.label,
            clip.name,
            clip.duration,
            model.fade_meshes
        );
        Ok(model)
    }

    /// Loads the configured HDR environment, if any.
    pub fn load_environment(&mut self) -> Result<()> {
        let Some(env) = self.config.environment.clone() else {
            return Ok(());
        };
        let map = load_hdr_environment(&env.hdr_path)?;
        self.set_environment_map(map);
        Ok(())
    }

    /// Installs an equirect map as lighting environment (and background,
    /// when configured).
    pub fn set_environment_map(&mut self, map: EquirectMap) {
        let env = self.config.environment.clone().unwrap_or_default();
        self.scene.environment.set_env_map(Some(Arc::new(map)));
        self.scene.environment.intensity = env.intensity;
        if env.as_background {
            self.scene.background = Background::Environment;
        }
    }

    fn fail(&mut self, error: &PlayerError) {
        log::error!("Failed to load model: {error}");
        let muted = self.clock.is_muted();
        self.reset_stage();
        self.mixer = AnimationMixer::new();
        self.clock = PlaybackClock::with_time_source(0.0, self.time_source.clone());
        self.clock.set_muted(muted);
        self.panel.timeline = TimelineSlider::default();
        self.panel.show_playing(false);
        self.opacity = self.config.fade.opaque;
        self.status = PlayerStatus::Failed(error.to_string());
    }

    /// Clears model content, keeping lights and the environment.
    fn reset_stage(&mut self) {
        if self.model.is_none() && self.scene.nodes.is_empty() {
            return;
        }
        let mut scene = Scene::new();
        scene.environment = std::mem::take(&mut self.scene.environment);
        scene.background = std::mem::take(&mut self.scene.background);
        add_lights(&mut scene, &self.config);
        self.scene = scene;
        self.model = None;
    }

    fn poll_load(&mut self, changes: &mut FrameChanges) {
        let Some(ticket) = self.pending.as_ref() else {
            return;
        };
        match ticket.poll() {
            LoadStatus::Pending => {}
            LoadStatus::Ready(doc) => {
                self.pending = None;
                *changes |= match self.install(&doc) {
                    Ok(_) => FrameChanges::MODEL_LOADED,
                    Err(_) => FrameChanges::LOAD_FAILED,
                };
            }
            LoadStatus::Failed(e) => {
                self.pending = None;
                self.fail(&e);
                *changes |= FrameChanges::LOAD_FAILED;
            }
        }
    }

    fn poll_xr(&mut self, changes: &mut FrameChanges) {
        let Some(mode) = self.ar.as_mut().and_then(ArSession::poll) else {
            return;
        };
        self.renderer.set_presentation(mode);
        *changes |= FrameChanges::PRESENTATION_CHANGED;
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Runs one frame with a scheduler-provided wall delta in seconds.
    pub fn frame(&mut self, delta: f32) -> FrameReport {
        let mut changes = FrameChanges::empty();
        self.poll_load(&mut changes);
        self.poll_xr(&mut changes);

        let before = self.clock.current_time();
        let mut driver = SceneAnimator::new(&mut self.mixer, &mut self.scene);
        let scaled = self.clock.advance(delta, &mut driver);

        self.finish_frame(delta, scaled, before, changes)
    }

    /// Runs one frame timed by the player's own wall clocks.
    ///
    /// Playback uses the clock that stops while paused; camera damping uses
    /// a free-running one.
    pub fn tick(&mut self) -> FrameReport {
        let mut changes = FrameChanges::empty();
        self.poll_load(&mut changes);
        self.poll_xr(&mut changes);

        let delta = self.frame_clock.delta() as f32;
        let before = self.clock.current_time();
        let mut driver = SceneAnimator::new(&mut self.mixer, &mut self.scene);
        let scaled = self.clock.tick(&mut driver);

        self.finish_frame(delta, scaled, before, changes)
    }

    fn finish_frame(
        &mut self,
        delta: f32,
        scaled: f32,
        before: f32,
        mut changes: FrameChanges,
    ) -> FrameReport {
        let current_time = self.clock.current_time();
        let duration = self.clock.duration();

        if scaled > 0.0 {
            changes |= FrameChanges::ADVANCED;
            if current_time < before {
                changes |= FrameChanges::LOOPED;
            }
        }

        let opacity = self.keyframer.update(&mut self.scene, current_time, duration);
        if (opacity - self.opacity).abs() > f32::EPSILON {
            changes |= FrameChanges::OPACITY_CHANGED;
        }
        self.opacity = opacity;

        if self.is_ready() {
            if self.panel.timeline.sync(current_time, duration, scaled) {
                changes |= FrameChanges::TIMELINE_RESET;
            }
        }

        if self.presentation() == PresentationMode::Screen {
            self.controls.update(&mut self.camera, &self.input, delta);
        }

        self.scene.update_matrix_world();
        self.renderer.render(&self.scene, &self.camera);
        self.input.end_frame();

        FrameReport {
            delta,
            scaled_delta: scaled,
            current_time,
            frame: self.clock.current_frame(),
            opacity,
            changes,
        }
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Dispatches one UI event.
    ///
    /// Playback events before a successful load are ignored: a player whose
    /// model failed to load never starts.
    pub fn handle(&mut self, event: ControlEvent) -> Result<()> {
        log::debug!("Control event: {event:?}");
        match event {
            ControlEvent::Scrub(fraction) => {
                self.scrub(fraction);
                Ok(())
            }
            ControlEvent::TogglePlay => {
                self.toggle_play();
                Ok(())
            }
            ControlEvent::SetSpeed(speed) => self.set_speed(speed),
            ControlEvent::ToggleMute => {
                self.toggle_mute();
                Ok(())
            }
            ControlEvent::EnterAr => self.enter_ar().map(|_| ()),
            ControlEvent::ArSessionEnded => {
                self.on_xr_session_end();
                Ok(())
            }
            ControlEvent::Resize { width, height } => {
                self.resize(width, height);
                Ok(())
            }
        }
    }

    /// Jumps to `fraction` of the clip. Returns the new time.
    pub fn scrub(&mut self, fraction: f32) -> f32 {
        if !self.is_ready() {
            log::debug!("Scrub ignored: no model loaded");
            return self.clock.current_time();
        }
        let mut driver = SceneAnimator::new(&mut self.mixer, &mut self.scene);
        let time = self.clock.seek(fraction, &mut driver);
        self.panel.timeline.value = time * 100.0;
        self.audio.on_seek(time, self.clock.is_playing());
        time
    }

    /// Play/pause button. Returns whether playback is now running.
    pub fn toggle_play(&mut self) -> bool {
        if !self.is_ready() {
            log::debug!("Play ignored: no model loaded");
            return false;
        }
        let mut driver = SceneAnimator::new(&mut self.mixer, &mut self.scene);
        let playing = self.clock.toggle_playing(&mut driver);
        self.panel.show_playing(playing);
        self.audio.on_play_state(playing);
        playing
    }

    /// Selects a speed multiplier from the offered options.
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        let speed = self.panel.speeds.select(speed)?;
        self.clock.set_speed(speed)?;
        self.audio.on_speed(speed);
        Ok(())
    }

    /// Mute button. Returns whether audio is now muted.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.clock.toggle_muted();
        self.panel.show_muted(muted);
        self.audio.on_mute(muted);
        muted
    }

    /// Requests immersive AR; the caller shows any error to the user.
    ///
    /// Returns the mode now in effect. With an asynchronous runtime this is
    /// still [`PresentationMode::Screen`]; the switch (or the fallback when
    /// the runtime refuses) happens on a later frame.
    pub fn enter_ar(&mut self) -> Result<PresentationMode> {
        let Some(session) = self.ar.as_mut() else {
            return Err(PlayerError::XrUnavailable);
        };
        let mode = session.enter()?;
        self.renderer.set_presentation(mode);
        Ok(mode)
    }

    pub fn on_xr_session_end(&mut self) {
        if let Some(session) = self.ar.as_mut() {
            let mode = session.on_session_end();
            self.renderer.set_presentation(mode);
        }
    }

    /// Viewport resize: camera aspect, renderer surface and input bounds.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_from_size(width, height);
        self.renderer.resize(width, height);
        self.input.handle_resize(width, height);
    }
}

fn add_lights(scene: &mut Scene, config: &PlayerConfig) {
    let l = &config.lighting;
    scene.add_light(
        Light::new_hemisphere(
            color_from_hex(l.hemisphere_sky),
            color_from_hex(l.hemisphere_ground),
            l.hemisphere_intensity,
        )
        .at(l.hemisphere_position.into()),
    );
    scene.add_light(
        Light::new_directional(color_from_hex(l.directional_color), l.directional_intensity)
            .at(l.directional_position.into()),
    );
    scene.add_light(Light::new_ambient(color_from_hex(l.ambient_color), l.ambient_intensity));
}
