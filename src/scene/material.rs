use std::borrow::Cow;

use glam::Vec4;

use crate::scene::MaterialKey;

/// Physically based material (metallic-roughness with clearcoat).
///
/// Only CPU-side parameters live here. A renderer compares `version` against
/// the value it last uploaded to decide whether the material changed.
#[derive(Debug, Clone)]
pub struct PhysicalMaterial {
    pub name: Cow<'static, str>,
    color: Vec4,
    opacity: f32,
    transparent: bool,
    roughness: f32,
    metalness: f32,
    clearcoat: f32,
    clearcoat_roughness: f32,

    /// Set on materials whose opacity follows the animation fade.
    pub(crate) fade_target: bool,
    version: u64,
}

macro_rules! material_setters {
    ($(($field:ident, $setter:ident, $ty:ty, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            #[inline]
            #[must_use]
            pub fn $field(&self) -> $ty {
                self.$field
            }

            #[doc = concat!("Sets: ", $doc)]
            pub fn $setter(&mut self, value: $ty) {
                if self.$field != value {
                    self.$field = value;
                    self.version = self.version.wrapping_add(1);
                }
            }
        )*
    };
}

impl PhysicalMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            name: Cow::Borrowed("PhysicalMaterial"),
            color,
            opacity: 1.0,
            transparent: false,
            roughness: 1.0,
            metalness: 0.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            fade_target: false,
            version: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// The material that replaces the tagged fade material on load:
    /// black, transparent, glossy clearcoat.
    #[must_use]
    pub fn fade_replacement() -> Self {
        let mut mat = Self::new(Vec4::new(0.0, 0.0, 0.0, 1.0));
        mat.transparent = true;
        mat.opacity = 1.0;
        mat.roughness = 0.3;
        mat.metalness = 0.1;
        mat.clearcoat = 1.0;
        mat.clearcoat_roughness = 0.1;
        mat.fade_target = true;
        mat
    }

    material_setters!(
        (color, set_color, Vec4, "Base color."),
        (opacity, set_opacity, f32, "Opacity value."),
        (transparent, set_transparent, bool, "Whether the material is alpha blended."),
        (roughness, set_roughness, f32, "Roughness factor."),
        (metalness, set_metalness, f32, "Metalness factor."),
        (clearcoat, set_clearcoat, f32, "Clearcoat layer intensity."),
        (clearcoat_roughness, set_clearcoat_roughness, f32, "Clearcoat layer roughness."),
    );

    #[inline]
    #[must_use]
    pub fn is_fade_target(&self) -> bool {
        self.fade_target
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for PhysicalMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

/// A drawable: a named primitive set referencing one material.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: Cow<'static, str>,
    pub material: MaterialKey,
    pub vertex_count: usize,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, material: MaterialKey) -> Self {
        Self {
            name: name.into(),
            material,
            vertex_count: 0,
        }
    }
}
