//! Environment
//!
//! Describes image based lighting and the scene background. The HDR map is
//! kept as decoded equirectangular texels; prefiltering is the renderer's job.

use std::sync::Arc;

use glam::{Vec3, Vec4};

/// Decoded equirectangular HDR image in linear RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct EquirectMap {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 3]>,
}

impl EquirectMap {
    /// Mean radiance, handy as an ambient fallback.
    #[must_use]
    pub fn average_color(&self) -> Vec3 {
        if self.texels.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self
            .texels
            .iter()
            .fold(Vec3::ZERO, |acc, t| acc + Vec3::from_array(*t));
        sum / self.texels.len() as f32
    }
}

/// IBL environment configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub map: Option<Arc<EquirectMap>>,
    pub intensity: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: None,
            intensity: 1.0,
        }
    }

    pub fn set_env_map(&mut self, map: Option<Arc<EquirectMap>>) {
        self.map = map;
    }

    #[must_use]
    pub fn has_env_map(&self) -> bool {
        self.map.is_some()
    }
}

/// What is drawn behind the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Color(Vec4),
    /// Draw the environment map as a skybox.
    Environment,
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Vec4::new(0.0, 0.0, 0.0, 1.0))
    }
}
