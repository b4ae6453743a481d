use crate::animation::FRAME_COUNT;
use crate::errors::{PlayerError, Result};
use crate::playback::AnimationDriver;
use crate::playback::state::PlaybackState;
use crate::utils::time::{Clock, SystemTimeSource, TimeSource};

/// Playback clock for one clip.
///
/// Advances the playback position by `delta * speed` while playing, wraps
/// it at the clip duration, and issues the matching calls on an
/// [`AnimationDriver`]. A wall [`Clock`] supplies frame deltas for
/// [`tick`](Self::tick); it is restarted on every resume with its reference
/// set to the current position.
#[derive(Debug)]
pub struct PlaybackClock<S: TimeSource = SystemTimeSource> {
    state: PlaybackState,
    duration: f32,
    wall: Clock<S>,
}

impl PlaybackClock<SystemTimeSource> {
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self::with_time_source(duration, SystemTimeSource::new())
    }
}

impl<S: TimeSource> PlaybackClock<S> {
    /// A paused clock at time 0. Negative or non-finite durations are
    /// treated as 0 (a single static frame).
    #[must_use]
    pub fn with_time_source(duration: f32, source: S) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            state: PlaybackState::default(),
            duration,
            wall: Clock::new(source),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.state.current_time
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    #[inline]
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.state.is_muted
    }

    #[must_use]
    pub fn wall_clock(&self) -> &Clock<S> {
        &self.wall
    }

    /// `current_time / duration`, 0 when the clip has no length.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            self.state.current_time / self.duration
        } else {
            0.0
        }
    }

    /// Current frame on the normalized [`FRAME_COUNT`] scale.
    #[must_use]
    pub fn current_frame(&self) -> f32 {
        self.progress() * FRAME_COUNT
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Starts or pauses playback. Returns whether the state changed.
    ///
    /// Resuming restarts the wall clock with its elapsed time set to the
    /// current position, so the next frame delta covers only time spent
    /// playing.
    pub fn set_playing(&mut self, playing: bool, driver: &mut impl AnimationDriver) -> bool {
        if self.state.is_playing == playing {
            return false;
        }
        self.state.is_playing = playing;
        driver.set_paused(!playing);

        if playing {
            self.wall.start();
            self.wall.elapsed_time = f64::from(self.state.current_time);
            log::debug!("Playback resumed at {:.3}s", self.state.current_time);
        } else {
            self.wall.stop();
            log::debug!("Playback paused at {:.3}s", self.state.current_time);
        }
        true
    }

    /// Play/pause button. Returns the new playing flag.
    pub fn toggle_playing(&mut self, driver: &mut impl AnimationDriver) -> bool {
        let playing = !self.state.is_playing;
        self.set_playing(playing, driver);
        playing
    }

    /// Jumps to `fraction` of the clip, clamped to `[0, 1]`.
    ///
    /// When paused the driver is held at exactly that time.
    pub fn seek(&mut self, fraction: f32, driver: &mut impl AnimationDriver) -> f32 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        self.state.current_time = fraction * self.duration;
        driver.set_time(self.state.current_time);
        if !self.state.is_playing {
            driver.set_paused(true);
        }
        self.state.current_time
    }

    /// Sets the speed multiplier used from the next frame on.
    pub fn set_speed(&mut self, multiplier: f32) -> Result<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(PlayerError::InvalidSpeed(multiplier));
        }
        self.state.speed = multiplier;
        Ok(())
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state.is_muted = muted;
    }

    /// Mute button. Returns the new muted flag.
    pub fn toggle_muted(&mut self) -> bool {
        self.state.is_muted = !self.state.is_muted;
        self.state.is_muted
    }

    /// Advances by a scheduler-provided wall delta (seconds).
    ///
    /// Returns the speed-scaled delta applied, 0 while paused.
    pub fn advance(&mut self, delta: f32, driver: &mut impl AnimationDriver) -> f32 {
        if !self.state.is_playing || !delta.is_finite() || delta <= 0.0 {
            return 0.0;
        }

        let scaled = delta * self.state.speed;
        driver.advance(scaled);
        self.state.current_time = self.wrap(self.state.current_time + scaled);
        scaled
    }

    /// Advances by the wall-clock delta since the previous tick.
    pub fn tick(&mut self, driver: &mut impl AnimationDriver) -> f32 {
        let delta = self.wall.delta() as f32;
        self.advance(delta, driver)
    }

    fn wrap(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        let wrapped = time.rem_euclid(self.duration);
        // rem_euclid may round up to the modulus itself
        if wrapped >= self.duration { 0.0 } else { wrapped }
    }
}
