pub mod gltf;
pub mod hdr;

pub use self::gltf::{GltfDocument, GltfLoader, LoadedModel};
pub use self::hdr::{decode_hdr, load_hdr_environment};
