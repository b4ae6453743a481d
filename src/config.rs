//! Player configuration
//!
//! One [`PlayerConfig`] describes a complete viewer: which model and HDRI to
//! load, how the scene is lit, and whether audio sync and AR are enabled.
//! The three shipped variants are presets of the same structure.
//!
//! Configurations are plain serde data and can be read from JSON; missing
//! fields take their defaults.
//!
//! ```rust,ignore
//! let config = PlayerConfig::from_json_str(r#"{ "ar_enabled": true }"#)?;
//! assert_eq!(config.model_path, "assets/FTIR_v3.glb");
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::fade::FadeCurve;
use crate::renderer::settings::RenderSettings;

/// Default name of the material whose opacity follows the fade.
pub const DEFAULT_FADE_MATERIAL: &str = "Farbe weiß transparent";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub model_path: String,
    /// Meshes using a material with this name get the fading replacement.
    pub fade_material: String,
    pub fade: FadeCurve,
    pub environment: Option<EnvironmentConfig>,
    pub lighting: LightingConfig,
    pub camera: CameraConfig,
    pub render: RenderSettings,
    /// Soundtrack element; `None` for silent variants.
    pub audio: Option<AudioConfig>,
    pub ar_enabled: bool,
    /// Multipliers offered by the speed selector.
    pub speed_options: Vec<f32>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            model_path: "assets/FTIR_v3.glb".to_string(),
            fade_material: DEFAULT_FADE_MATERIAL.to_string(),
            fade: FadeCurve::default(),
            environment: Some(EnvironmentConfig::default()),
            lighting: LightingConfig::default(),
            camera: CameraConfig::default(),
            render: RenderSettings::default(),
            audio: None,
            ar_enabled: false,
            speed_options: vec![0.25, 0.5, 1.0, 1.5, 2.0],
        }
    }
}

impl PlayerConfig {
    /// Model viewer without soundtrack or AR.
    #[must_use]
    pub fn studio() -> Self {
        Self::default()
    }

    /// Viewer with the soundtrack kept in sync with the timeline.
    #[must_use]
    pub fn with_audio() -> Self {
        Self {
            audio: Some(AudioConfig::default()),
            ..Self::default()
        }
    }

    /// Viewer with an "enter AR" control.
    #[must_use]
    pub fn augmented() -> Self {
        Self {
            ar_enabled: true,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded player config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Radiance HDR equirectangular image.
    pub hdr_path: String,
    /// Also draw the map as the background.
    pub as_background: bool,
    pub intensity: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            hdr_path: "assets/kloofendal_misty_morning_puresky_8k.hdr".to_string(),
            as_background: true,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub hemisphere_sky: u32,
    pub hemisphere_ground: u32,
    pub hemisphere_intensity: f32,
    pub hemisphere_position: [f32; 3],
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
    pub ambient_color: u32,
    pub ambient_intensity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            hemisphere_sky: 0xffffff,
            hemisphere_ground: 0x444444,
            hemisphere_intensity: 1.0,
            hemisphere_position: [0.0, 20.0, 0.0],
            directional_color: 0xffffff,
            directional_intensity: 1.0,
            directional_position: [0.0, 20.0, 10.0],
            ambient_color: 0xffffff,
            ambient_intensity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    /// Orbit target.
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [-150.0, 100.0, 200.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraConfig {
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// DOM id of the `<audio>` element on the web.
    pub element_id: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            element_id: "backgroundAudio".to_string(),
        }
    }
}
