//! Control surface
//!
//! The viewer's controls are a scrub slider, a play/pause button, a speed
//! selector and a mute button (plus "enter AR" where enabled). Platform UI
//! code translates widget events into [`ControlEvent`]s and reads the
//! widget state back from [`ControlPanel`].

use serde::{Deserialize, Serialize};

use crate::errors::{PlayerError, Result};

/// A user interaction, one per widget event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// Slider moved; position as a fraction of the clip.
    Scrub(f32),
    TogglePlay,
    SetSpeed(f32),
    ToggleMute,
    EnterAr,
    /// The XR runtime ended the immersive session.
    ArSessionEnded,
    Resize { width: u32, height: u32 },
}

/// Timeline slider in hundredths of a second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimelineSlider {
    pub max: f32,
    pub value: f32,
}

impl TimelineSlider {
    /// Slider for a clip of `duration` seconds.
    #[must_use]
    pub fn for_duration(duration: f32) -> Self {
        Self {
            max: duration.max(0.0) * 100.0,
            value: 0.0,
        }
    }

    /// Mirrors the playback position.
    ///
    /// On the frame where the position is within one step of the end, the
    /// slider snaps back to 0 so it never lingers at the far right while
    /// the clip restarts. Returns whether that reset happened.
    pub fn sync(&mut self, current_time: f32, duration: f32, delta: f32) -> bool {
        if delta > 0.0 && current_time >= duration - delta {
            self.value = 0.0;
            return true;
        }
        self.value = current_time * 100.0;
        false
    }

    /// Converts a raw slider value into a clip fraction.
    #[must_use]
    pub fn fraction(&self, value: f32) -> f32 {
        if self.max > 0.0 { value / self.max } else { 0.0 }
    }
}

/// The enumerated multipliers offered by the speed selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedOptions {
    options: Vec<f32>,
    selected: f32,
}

impl Default for SpeedOptions {
    fn default() -> Self {
        Self::new(vec![0.25, 0.5, 1.0, 1.5, 2.0])
    }
}

impl SpeedOptions {
    /// Invalid entries (non-positive, non-finite) are dropped; an empty
    /// list falls back to `[1.0]`.
    #[must_use]
    pub fn new(mut options: Vec<f32>) -> Self {
        options.retain(|s| s.is_finite() && *s > 0.0);
        options.sort_by(f32::total_cmp);
        options.dedup();
        if options.is_empty() {
            options.push(1.0);
        }
        let selected = if options.contains(&1.0) { 1.0 } else { options[0] };
        Self { options, selected }
    }

    #[must_use]
    pub fn options(&self) -> &[f32] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> f32 {
        self.selected
    }

    /// Selects one of the offered multipliers.
    pub fn select(&mut self, speed: f32) -> Result<f32> {
        let Some(&found) = self.options.iter().find(|&&s| (s - speed).abs() < 1e-6) else {
            return Err(PlayerError::InvalidSpeed(speed));
        };
        self.selected = found;
        Ok(found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayButtonIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuteButtonIcon {
    VolumeUp,
    VolumeMute,
}

/// Widget state the UI renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub timeline: TimelineSlider,
    pub speeds: SpeedOptions,
    pub play_icon: PlayButtonIcon,
    pub mute_icon: MuteButtonIcon,
    /// Whether the mute button is shown at all.
    pub audio_controls: bool,
    pub ar_button: bool,
}

impl ControlPanel {
    #[must_use]
    pub fn new(speeds: SpeedOptions, audio_controls: bool, ar_button: bool) -> Self {
        Self {
            timeline: TimelineSlider::default(),
            speeds,
            play_icon: PlayButtonIcon::Play,
            mute_icon: MuteButtonIcon::VolumeUp,
            audio_controls,
            ar_button,
        }
    }

    pub fn show_playing(&mut self, playing: bool) {
        self.play_icon = if playing {
            PlayButtonIcon::Pause
        } else {
            PlayButtonIcon::Play
        };
    }

    pub fn show_muted(&mut self, muted: bool) {
        self.mute_icon = if muted {
            MuteButtonIcon::VolumeMute
        } else {
            MuteButtonIcon::VolumeUp
        };
    }
}
