use std::borrow::Cow;

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::environment::{Background, Environment};
use crate::scene::light::Light;
use crate::scene::material::{Mesh, PhysicalMaterial};
use crate::scene::node::Node;
use crate::scene::{LightKey, MaterialKey, MeshKey, NodeHandle};

/// Scene graph container.
///
/// Pure data: node hierarchy plus the mesh, material and light pools the
/// nodes refer to, and the global environment.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub meshes: SlotMap<MeshKey, Mesh>,
    pub materials: SlotMap<MaterialKey, PhysicalMaterial>,
    pub lights: SlotMap<LightKey, Light>,

    pub environment: Environment,
    pub background: Background,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            environment: Environment::new(),
            background: Background::default(),
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn create_node_with_name(&mut self, name: impl Into<Cow<'static, str>>) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        if self.nodes.contains_key(parent) {
            self.link(handle, parent);
        } else {
            log::warn!("Parent node not found, adding child at root level");
            self.root_nodes.push(handle);
        }
        handle
    }

    /// Moves `child` under `parent`, detaching it from its old parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            log::error!("Node not found during attach!");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        self.link(child, parent);
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_ref())
    }

    /// Depth-first search for a node named `name` under `root` (inclusive).
    #[must_use]
    pub fn find_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Visits `root` and all of its descendants, parents before children.
    pub fn traverse(&self, root: NodeHandle, mut visit: impl FnMut(NodeHandle, &Node)) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            visit(handle, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn add_material(&mut self, material: PhysicalMaterial) -> MaterialKey {
        self.materials.insert(material)
    }

    #[must_use]
    pub fn get_material(&self, key: MaterialKey) -> Option<&PhysicalMaterial> {
        self.materials.get(key)
    }

    pub fn get_material_mut(&mut self, key: MaterialKey) -> Option<&mut PhysicalMaterial> {
        self.materials.get_mut(key)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    /// Material used by the mesh attached to `handle`, if any.
    #[must_use]
    pub fn node_material(&self, handle: NodeHandle) -> Option<MaterialKey> {
        let mesh_key = self.nodes.get(handle)?.mesh?;
        self.meshes.get(mesh_key).map(|m| m.material)
    }

    pub fn add_light(&mut self, light: Light) -> LightKey {
        self.lights.insert(light)
    }

    /// Materials tagged to follow the animation fade.
    pub fn fade_materials_mut(&mut self) -> impl Iterator<Item = &mut PhysicalMaterial> {
        self.materials.values_mut().filter(|m| m.fade_target)
    }

    // ========================================================================
    // Matrix update
    // ========================================================================

    /// Updates world matrices for the whole scene. Called once per frame
    /// before rendering.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);
        for &root in self.root_nodes.iter().rev() {
            stack.push((root, Affine3A::IDENTITY, false));
        }

        while let Some((handle, parent_world, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };

            let local_changed = node.transform.update_local_matrix();
            let world_needs_update = local_changed || parent_changed;
            if world_needs_update {
                let world = parent_world * *node.transform.local_matrix();
                node.transform.set_world_matrix(world);
            }

            let current_world = node.transform.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, current_world, world_needs_update));
            }
        }
    }
}
