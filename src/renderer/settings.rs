//! Renderer settings
//!
//! Output-stage configuration handed to whichever renderer presents the
//! scene. The defaults match the viewer's physically based look: ACES
//! filmic tone mapping with a raised exposure.

use serde::{Deserialize, Serialize};

/// Tone mapping operator applied to the HDR frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToneMappingMode {
    /// No tone mapping (for debugging or LDR workflows)
    Linear,
    /// Classic operator, soft highlight rolloff
    Reinhard,
    /// Industry standard filmic curve
    #[default]
    AcesFilmic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub antialias: bool,
    /// Interpret light intensities in physical units.
    pub physically_correct_lights: bool,
    pub tone_mapping: ToneMappingMode,
    pub exposure: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            physically_correct_lights: true,
            tone_mapping: ToneMappingMode::AcesFilmic,
            exposure: 1.5,
        }
    }
}
