//! Scene graph module
//!
//! Manages the scene hierarchy and its components:
//! - [`Node`]: scene node with parent/child links and a transform
//! - [`Transform`]: position, rotation, scale with cached matrices
//! - [`Scene`]: the container owning nodes, meshes, materials and lights
//! - [`Camera`]: perspective camera
//! - [`Light`]: hemisphere, directional and ambient lights
//! - [`Environment`]: HDR environment map and background

pub mod camera;
pub mod environment;
pub mod light;
pub mod material;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use environment::{Background, Environment, EquirectMap};
pub use light::{Light, LightKind};
pub use material::{Mesh, PhysicalMaterial};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct MaterialKey;
    pub struct LightKey;
}
