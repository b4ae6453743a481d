use std::path::Path;

use image::ImageFormat;

use crate::errors::{PlayerError, Result};
use crate::scene::EquirectMap;

/// Loads a Radiance `.hdr` equirectangular image from disk.
pub fn load_hdr_environment(path: impl AsRef<Path>) -> Result<EquirectMap> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PlayerError::AssetNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let map = decode_hdr(&bytes, path.display().to_string())?;
    log::info!("Loaded HDR environment {} ({}x{})", map.label, map.width, map.height);
    Ok(map)
}

/// Decodes Radiance HDR bytes into linear RGB texels.
pub fn decode_hdr(bytes: &[u8], label: impl Into<String>) -> Result<EquirectMap> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Hdr)?.into_rgb32f();
    let (width, height) = image.dimensions();
    let texels = image.pixels().map(|p| p.0).collect();

    Ok(EquirectMap {
        label: label.into(),
        width,
        height,
        texels,
    })
}
