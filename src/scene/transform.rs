use glam::{Affine3A, Mat3, Quat, Vec3};

/// TRS snapshot the cached local matrix was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Trs {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// Position, rotation and scale of a node or camera.
///
/// The animation system writes the public TRS fields directly. The local
/// matrix is rebuilt lazily in [`update_local_matrix`](Self::update_local_matrix),
/// and the world matrix is filled in by the scene's hierarchy pass.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    /// `None` forces a rebuild on the next update.
    built_from: Option<Trs>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            built_from: None,
        }
    }

    fn trs(&self) -> Trs {
        Trs {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Rebuilds the local matrix when the TRS differs from the one it was
    /// last built from. Returns whether it was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = self.trs();
        if self.built_from == Some(current) {
            return false;
        }
        self.local_matrix =
            Affine3A::from_scale_rotation_translation(current.scale, current.rotation, current.position);
        self.built_from = Some(current);
        true
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Rotates so that local -Z faces `target` (parent space). Degenerate
    /// when `target` lies along `up`; the rotation is then left unchanged.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        let side = forward.cross(up);
        if side.length_squared() < 1e-4 {
            return;
        }

        let right = side.normalize();
        let true_up = right.cross(forward).normalize();
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward));
    }

    /// Forces the local matrix (and so the subtree's world matrices) to be
    /// rebuilt on the next hierarchy pass.
    pub fn mark_dirty(&mut self) {
        self.built_from = None;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_matrix_rebuilds_only_on_change() {
        let mut t = Transform::new();
        assert!(t.update_local_matrix(), "first update always builds");
        assert!(!t.update_local_matrix());

        t.position = Vec3::new(1.0, 2.0, 3.0);
        assert!(t.update_local_matrix());
        assert_eq!(Vec3::from(t.local_matrix().translation), Vec3::new(1.0, 2.0, 3.0));

        t.mark_dirty();
        assert!(t.update_local_matrix());
    }

    #[test]
    fn look_at_faces_target() {
        let mut t = Transform::new();
        t.position = Vec3::new(0.0, 0.0, 5.0);
        t.look_at(Vec3::ZERO, Vec3::Y);

        let forward = t.rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }
}
