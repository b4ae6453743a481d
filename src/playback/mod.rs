//! Playback clock
//!
//! [`PlaybackClock`] owns the [`PlaybackState`] and translates control
//! operations into calls on an [`AnimationDriver`]. The driver is the
//! animation backend; [`SceneAnimator`] adapts an
//! [`AnimationMixer`](crate::animation::AnimationMixer) posing a [`Scene`].

pub mod clock;
pub mod state;

pub use clock::PlaybackClock;
pub use state::PlaybackState;

use crate::animation::AnimationMixer;
use crate::scene::Scene;

/// The animation side of playback.
pub trait AnimationDriver {
    /// Advances animation time by `delta` seconds (already speed scaled).
    fn advance(&mut self, delta: f32);
    /// Jumps to an absolute time in seconds.
    fn set_time(&mut self, seconds: f32);
    /// Current animation time in seconds.
    fn time(&self) -> f32;
    fn set_paused(&mut self, paused: bool);
}

/// Driver for a mixer that poses nodes of a scene.
pub struct SceneAnimator<'a> {
    pub mixer: &'a mut AnimationMixer,
    pub scene: &'a mut Scene,
}

impl<'a> SceneAnimator<'a> {
    pub fn new(mixer: &'a mut AnimationMixer, scene: &'a mut Scene) -> Self {
        Self { mixer, scene }
    }
}

impl AnimationDriver for SceneAnimator<'_> {
    fn advance(&mut self, delta: f32) {
        self.mixer.advance(delta, self.scene);
    }

    fn set_time(&mut self, seconds: f32) {
        self.mixer.set_time(seconds, self.scene);
    }

    fn time(&self) -> f32 {
        self.mixer.time()
    }

    fn set_paused(&mut self, paused: bool) {
        self.mixer.set_paused(paused);
    }
}

/// Driver that only tracks time, for timeline-only playback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDriver {
    time: f32,
}

impl AnimationDriver for NullDriver {
    fn advance(&mut self, delta: f32) {
        self.time += delta;
    }

    fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn set_paused(&mut self, _paused: bool) {}
}
