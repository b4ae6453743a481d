use serde::{Deserialize, Serialize};

/// Mutable playback state, owned by a single [`PlaybackClock`](super::PlaybackClock).
///
/// `current_time` stays in `[0, duration)` while playing; a scrub to the
/// very end may leave it at `duration` until the next advance wraps it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_time: f32,
    pub is_playing: bool,
    pub speed: f32,
    pub is_muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            speed: 1.0,
            is_muted: false,
        }
    }
}
