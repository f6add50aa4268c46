//! I/O helpers for raster images and JSON.
//!
//! - `load_image`: read a PNG/JPEG/etc. from disk.
//! - `load_grayscale_plane`: read an image and convert it to a unit-interval plane.
//! - `save_image`: write an image, creating parent directories.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{convert, ImageF64};
use crate::error::{NormalMapError, Result};
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk without altering its channels.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| NormalMapError::Io(format!("Failed to open {}: {e}", path.display())))
}

/// Load an image from disk as a luminance plane in [0, 1].
pub fn load_grayscale_plane(path: &Path) -> Result<ImageF64> {
    let img = load_image(path)?;
    Ok(convert::to_array(&img))
}

/// Save an image; the format follows the file extension.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| NormalMapError::Io(format!("Failed to save {}: {e}", path.display())))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        NormalMapError::Io(format!(
            "Failed to serialize JSON for {}: {e}",
            path.display()
        ))
    })?;
    fs::write(path, json).map_err(|e| {
        NormalMapError::Io(format!("Failed to write JSON {}: {e}", path.display()))
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                NormalMapError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
