use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use glam::{Quat, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::animation::{
    AnimationClip, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use crate::errors::{PlayerError, Result};
use crate::scene::{MaterialKey, Mesh, Node, NodeHandle, PhysicalMaterial, Scene};

// ============================================================================
// Parsed document
// ============================================================================

/// A parsed glTF/GLB with its binary buffers, not yet in any scene.
///
/// Parsing is the expensive, self-contained step and may run off the frame
/// thread; instantiation mutates the scene and must not.
pub struct GltfDocument {
    pub label: String,
    document: gltf::Document,
    buffers: Vec<gltf::buffer::Data>,
}

impl std::fmt::Debug for GltfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GltfDocument")
            .field("label", &self.label)
            .field("nodes", &self.document.nodes().len())
            .field("animations", &self.document.animations().len())
            .finish_non_exhaustive()
    }
}

impl GltfDocument {
    /// Reads a `.gltf` or `.glb` file; external buffers are resolved
    /// relative to the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PlayerError::AssetNotFound(path.display().to_string()));
        }
        let (document, buffers, _images) = gltf::import(path)?;
        log::info!(
            "Parsed glTF {} ({} nodes, {} animations)",
            path.display(),
            document.nodes().len(),
            document.animations().len()
        );
        Ok(Self {
            label: path.display().to_string(),
            document,
            buffers,
        })
    }

    /// Parses an in-memory `.glb` or self-contained `.gltf` (data URIs).
    pub fn from_slice(bytes: &[u8], label: impl Into<String>) -> Result<Self> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        Ok(Self {
            label: label.into(),
            document,
            buffers,
        })
    }

    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.document.animations().len()
    }
}

// ============================================================================
// Instantiation
// ============================================================================

/// Result of inserting a document into a scene.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Root node holding the document's scene.
    pub root: NodeHandle,
    pub clips: Vec<Arc<AnimationClip>>,
    /// Number of meshes that received the fade material.
    pub fade_meshes: usize,
}

impl LoadedModel {
    /// The clip that is played: the first one in the file.
    #[must_use]
    pub fn primary_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.clips.first()
    }
}

/// Builds scene content from a [`GltfDocument`].
pub struct GltfLoader<'a> {
    scene: &'a mut Scene,
    buffers: &'a [gltf::buffer::Data],
    /// Source material name whose meshes get the fade replacement.
    fade_material: &'a str,

    material_map: FxHashMap<usize, MaterialKey>,
    default_material: Option<MaterialKey>,
    fade_meshes: usize,
}

impl<'a> GltfLoader<'a> {
    /// Inserts `doc` under a new root node and returns its clips.
    pub fn load(doc: &'a GltfDocument, scene: &'a mut Scene, fade_material: &'a str) -> Result<LoadedModel> {
        let mut loader = GltfLoader {
            scene,
            buffers: &doc.buffers,
            fade_material,
            material_map: FxHashMap::default(),
            default_material: None,
            fade_meshes: 0,
        };

        loader.load_materials(&doc.document);

        let gltf_scene = doc
            .document
            .default_scene()
            .or_else(|| doc.document.scenes().next())
            .ok_or_else(|| PlayerError::GltfError(format!("{}: document has no scene", doc.label)))?;

        let root_name = gltf_scene
            .name()
            .map_or_else(|| Cow::Borrowed("glTF Root"), |n| Cow::Owned(n.to_string()));
        let root = loader.scene.add_node(Node::new(root_name));

        for node in gltf_scene.nodes() {
            loader.spawn_node(&node, root);
        }

        let clips = loader.load_animations(&doc.document)?;

        if loader.fade_meshes == 0 {
            log::warn!(
                "{}: no mesh uses material '{}', nothing will fade",
                doc.label,
                loader.fade_material
            );
        } else {
            log::info!("{}: {} mesh(es) tagged for fading", doc.label, loader.fade_meshes);
        }

        Ok(LoadedModel {
            root,
            clips,
            fade_meshes: loader.fade_meshes,
        })
    }

    fn load_materials(&mut self, document: &gltf::Document) {
        for material in document.materials() {
            let Some(index) = material.index() else {
                continue;
            };
            let name = material.name().unwrap_or("Material").to_string();

            let engine_mat = if name == self.fade_material {
                PhysicalMaterial::fade_replacement().with_name(name)
            } else {
                let pbr = material.pbr_metallic_roughness();
                let color = Vec4::from_array(pbr.base_color_factor());
                let mut mat = PhysicalMaterial::new(color).with_name(name);
                mat.set_roughness(pbr.roughness_factor());
                mat.set_metalness(pbr.metallic_factor());
                mat.set_opacity(color.w);
                mat.set_transparent(matches!(material.alpha_mode(), gltf::material::AlphaMode::Blend));
                mat
            };

            let key = self.scene.add_material(engine_mat);
            self.material_map.insert(index, key);
        }
    }

    fn default_material(&mut self) -> MaterialKey {
        if let Some(key) = self.default_material {
            return key;
        }
        let key = self
            .scene
            .add_material(PhysicalMaterial::default().with_name("Default"));
        self.default_material = Some(key);
        key
    }

    fn resolve_material(&mut self, index: Option<usize>) -> MaterialKey {
        match index.and_then(|i| self.material_map.get(&i).copied()) {
            Some(key) => key,
            None => self.default_material(),
        }
    }

    fn spawn_node(&mut self, gltf_node: &gltf::Node, parent: NodeHandle) {
        let mut node = Node::new(node_name(gltf_node).into_owned());
        let (translation, rotation, scale) = gltf_node.transform().decomposed();
        node.transform.position = Vec3::from_array(translation);
        node.transform.rotation = Quat::from_array(rotation);
        node.transform.scale = Vec3::from_array(scale);

        let handle = self.scene.add_to_parent(node, parent);

        if let Some(mesh) = gltf_node.mesh() {
            let mesh_name = mesh.name().unwrap_or("Mesh").to_string();
            for (i, primitive) in mesh.primitives().enumerate() {
                let material = self.resolve_material(primitive.material().index());
                if self.scene.get_material(material).is_some_and(PhysicalMaterial::is_fade_target) {
                    self.fade_meshes += 1;
                }

                let mut engine_mesh = Mesh::new(mesh_name.clone(), material);
                engine_mesh.vertex_count = primitive
                    .get(&gltf::Semantic::Positions)
                    .map_or(0, |accessor| accessor.count());
                let mesh_key = self.scene.add_mesh(engine_mesh);

                // First primitive lives on the node itself, the rest on children.
                let target = if i == 0 {
                    handle
                } else {
                    let name = format!("{mesh_name}_primitive_{i}");
                    self.scene.add_to_parent(Node::new(name), handle)
                };
                if let Some(node) = self.scene.get_node_mut(target) {
                    node.mesh = Some(mesh_key);
                }
            }
        }

        for child in gltf_node.children() {
            self.spawn_node(&child, handle);
        }
    }

    fn load_animations(&self, document: &gltf::Document) -> Result<Vec<Arc<AnimationClip>>> {
        let mut clips = Vec::new();

        for anim in document.animations() {
            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| self.buffers.get(buffer.index()).map(|data| &**data));
                let target_node = channel.target().node();

                let times: Vec<f32> = reader
                    .read_inputs()
                    .ok_or_else(|| PlayerError::GltfError("animation channel without input".into()))?
                    .collect();

                let interpolation = match channel.sampler().interpolation() {
                    gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                    gltf::animation::Interpolation::Step => InterpolationMode::Step,
                    gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let Some(outputs) = reader.read_outputs() else {
                    continue;
                };

                let (target, data) = match outputs {
                    gltf::animation::util::ReadOutputs::Translations(iter) => (
                        TargetPath::Translation,
                        TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    gltf::animation::util::ReadOutputs::Rotations(iter) => (
                        TargetPath::Rotation,
                        TrackData::Quaternion(KeyframeTrack::new(
                            times,
                            iter.into_f32().map(Quat::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    gltf::animation::util::ReadOutputs::Scales(iter) => (
                        TargetPath::Scale,
                        TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => {
                        log::debug!("Skipping morph weight channel on '{}'", node_name(&target_node));
                        continue;
                    }
                };

                tracks.push(Track {
                    meta: TrackMeta {
                        node_name: node_name(&target_node).into_owned(),
                        target,
                    },
                    data,
                });
            }

            let name = anim
                .name()
                .map_or_else(|| format!("animation_{}", anim.index()), str::to_string);
            let clip = AnimationClip::new(name, tracks);
            log::debug!("Loaded clip '{}' ({:.3}s)", clip.name, clip.duration);
            clips.push(Arc::new(clip));
        }

        Ok(clips)
    }
}

/// Node name used for both scene nodes and track binding. Unnamed nodes
/// get a stable index-based name.
fn node_name<'n>(node: &'n gltf::Node) -> Cow<'n, str> {
    node.name()
        .map_or_else(|| Cow::Owned(format!("node_{}", node.index())), Cow::Borrowed)
}
