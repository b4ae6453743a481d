//! Asset loading: glTF models, HDR environments, and background loads.

pub mod loaders;
pub mod ticket;

pub use loaders::{GltfDocument, GltfLoader, LoadedModel, decode_hdr, load_hdr_environment};
pub use ticket::{LoadStatus, LoadTicket};

/// Parses a glTF file on a worker thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_load(
    path: impl Into<std::path::PathBuf>,
) -> crate::errors::Result<LoadTicket<GltfDocument>> {
    let path = path.into();
    let label = path.display().to_string();
    LoadTicket::spawn(label, move || GltfDocument::from_path(&path))
}
