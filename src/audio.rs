//! Audio track synchronization
//!
//! The soundtrack is an external media element. It is not polled per
//! frame; instead every control event that changes playback is mirrored
//! onto it once, which keeps the two in lockstep without drift correction.

use crate::errors::Result;

/// A seekable media element with rate and mute control.
pub trait AudioTrack {
    /// Starts playback. May fail (e.g. autoplay policy).
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn current_time(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
    fn set_muted(&mut self, muted: bool);
}

/// Mirrors playback control events onto an optional audio track.
///
/// Without a track every call is a no-op, which is how the silent
/// variants run.
#[derive(Default)]
pub struct AudioSync {
    track: Option<Box<dyn AudioTrack>>,
}

impl std::fmt::Debug for AudioSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSync")
            .field("attached", &self.track.is_some())
            .finish()
    }
}

impl AudioSync {
    #[must_use]
    pub fn new(track: Option<Box<dyn AudioTrack>>) -> Self {
        Self { track }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.track.is_some()
    }

    /// Attaches `track` and brings it to the given rate and mute state.
    pub fn attach(&mut self, mut track: Box<dyn AudioTrack>, speed: f32, muted: bool) {
        track.set_playback_rate(f64::from(speed));
        track.set_muted(muted);
        self.track = Some(track);
    }

    /// Playback starts paused once the model is ready.
    pub fn on_ready(&mut self) {
        if let Some(track) = self.track.as_mut() {
            track.pause();
        }
    }

    pub fn on_play_state(&mut self, playing: bool) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        if playing {
            // Animation keeps running even if the browser refuses audio.
            if let Err(e) = track.play() {
                log::warn!("Audio playback failed: {e}");
            }
        } else {
            track.pause();
        }
    }

    pub fn on_seek(&mut self, current_time: f32, playing: bool) {
        let Some(track) = self.track.as_mut() else {
            return;
        };
        track.set_current_time(f64::from(current_time));
        if !playing {
            track.pause();
        }
    }

    pub fn on_speed(&mut self, speed: f32) {
        if let Some(track) = self.track.as_mut() {
            track.set_playback_rate(f64::from(speed));
        }
    }

    pub fn on_mute(&mut self, muted: bool) {
        if let Some(track) = self.track.as_mut() {
            track.set_muted(muted);
        }
    }

    /// Position reported by the track, if one is attached.
    #[must_use]
    pub fn current_time(&self) -> Option<f64> {
        self.track.as_ref().map(|t| t.current_time())
    }
}
