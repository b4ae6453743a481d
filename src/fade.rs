//! Opacity keyframing
//!
//! Tagged materials fade from opaque to half transparent early in the clip.
//! The opacity is a pure function of the normalized frame number:
//!
//! | frame          | opacity                                  |
//! |----------------|------------------------------------------|
//! | `< 60`         | 1.0                                      |
//! | `60 ..= 80`    | linear ramp `1.0 - 0.5 * (f - 60) / 20`  |
//! | `> 80`         | 0.5                                      |
//!
//! Because the frame is derived from the wrapped playback time, the fade
//! replays on every loop without any extra state.

use serde::{Deserialize, Serialize};

use crate::animation::FRAME_COUNT;
use crate::scene::Scene;

/// Parameters of the three-segment fade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeCurve {
    pub start_frame: f32,
    pub end_frame: f32,
    pub opaque: f32,
    pub faded: f32,
}

impl Default for FadeCurve {
    fn default() -> Self {
        Self {
            start_frame: 60.0,
            end_frame: 80.0,
            opaque: 1.0,
            faded: 0.5,
        }
    }
}

impl FadeCurve {
    /// Opacity at a normalized frame number.
    #[must_use]
    pub fn opacity_at_frame(&self, frame: f32) -> f32 {
        if frame < self.start_frame {
            self.opaque
        } else if frame <= self.end_frame {
            let span = self.end_frame - self.start_frame;
            if span <= 0.0 {
                return self.faded;
            }
            let t = (frame - self.start_frame) / span;
            self.opaque - (self.opaque - self.faded) * t
        } else {
            self.faded
        }
    }

    /// Opacity for a playback position. A clip without length is a single
    /// static frame and stays opaque.
    #[must_use]
    pub fn opacity(&self, current_time: f32, duration: f32) -> f32 {
        if duration <= 0.0 {
            return self.opaque;
        }
        let frame = (current_time / duration) * FRAME_COUNT;
        self.opacity_at_frame(frame)
    }
}

/// Opacity with the default curve.
#[must_use]
pub fn opacity(current_time: f32, duration: f32) -> f32 {
    FadeCurve::default().opacity(current_time, duration)
}

/// Writes the fade opacity into every tagged material of a scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpacityKeyframer {
    pub curve: FadeCurve,
}

impl OpacityKeyframer {
    #[must_use]
    pub fn new(curve: FadeCurve) -> Self {
        Self { curve }
    }

    /// Computes the opacity for `current_time` and applies it.
    /// Returns the value written.
    pub fn update(&self, scene: &mut Scene, current_time: f32, duration: f32) -> f32 {
        let value = self.curve.opacity(current_time, duration);
        Self::apply(scene, value);
        value
    }

    /// Sets `opacity` on every fade target. Returns how many materials
    /// actually changed.
    pub fn apply(scene: &mut Scene, opacity: f32) -> usize {
        let mut changed = 0;
        for material in scene.fade_materials_mut() {
            let before = material.version();
            material.set_opacity(opacity);
            if material.version() != before {
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn degenerate_curve_jumps_to_faded() {
        let curve = FadeCurve {
            start_frame: 50.0,
            end_frame: 50.0,
            ..FadeCurve::default()
        };
        assert!(approx(curve.opacity_at_frame(49.9), 1.0));
        assert!(approx(curve.opacity_at_frame(50.0), 0.5));
    }

    #[test]
    fn ramp_is_monotonic() {
        let curve = FadeCurve::default();
        let mut last = curve.opacity_at_frame(0.0);
        for i in 0..=1000 {
            let value = curve.opacity_at_frame(i as f32 * 0.1);
            assert!(value <= last + 1e-6);
            last = value;
        }
    }
}
