//! Renderer seam
//!
//! Pixel output is provided by the host (a GPU renderer, a browser engine).
//! The player only needs "render this scene through this camera" once per
//! frame, plus viewport and presentation changes.
//!
//! [`HeadlessRenderer`] implements the trait without a GPU. It records what
//! each frame would have drawn, which is what tests and batch runs need.

pub mod settings;

pub use settings::{RenderSettings, ToneMappingMode};

use glam::Vec3;

use crate::scene::{Camera, Scene};
use crate::xr::PresentationMode;

pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &Camera);

    fn resize(&mut self, width: u32, height: u32);

    /// Switches between screen and immersive presentation. Immersive
    /// renderers take over frame scheduling.
    fn set_presentation(&mut self, mode: PresentationMode) {
        let _ = mode;
    }
}

/// Snapshot of one headless frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub camera_position: Vec3,
    pub fade_opacities: Vec<f32>,
    pub visible_meshes: usize,
}

/// GPU-less renderer that records frame statistics.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub settings: RenderSettings,
    pub size: (u32, u32),
    pub presentation: PresentationMode,
    pub frames_rendered: u64,
    pub last_frame: Option<FrameRecord>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            size: (1280, 720),
            ..Self::default()
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        let fade_opacities = scene
            .materials
            .values()
            .filter(|m| m.is_fade_target())
            .map(|m| m.opacity())
            .collect();
        let visible_meshes = scene
            .nodes
            .values()
            .filter(|n| n.visible && n.mesh.is_some())
            .count();

        self.frames_rendered += 1;
        self.last_frame = Some(FrameRecord {
            camera_position: camera.position(),
            fade_opacities,
            visible_meshes,
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_presentation(&mut self, mode: PresentationMode) {
        self.presentation = mode;
    }
}

/// Renderers are often owned by the host and lent to the player.
impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        (**self).render(scene, camera);
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn set_presentation(&mut self, mode: PresentationMode) {
        (**self).set_presentation(mode);
    }
}
