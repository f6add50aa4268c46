//! File-level operations: build a map from image files, save and load it.
//!
//! These wrap the pure stages (`reconstruct`, `encode`/`decode`, the image
//! adapters) around a single read or write each. Nothing here keeps state
//! between calls.
use crate::error::{NormalMapError, Result};
use crate::image::io::{load_grayscale_plane, load_image, save_image};
use crate::image::{self as img, ImageF64};
use crate::normal::{self, Depth, EncodedMap, Equivalence, NormalMap, ReconstructOptions};
use crate::types::DirectionalSet;
use image::DynamicImage;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Load every present path as a luminance plane in [0, 1].
pub fn load_directional_images(paths: &DirectionalSet<PathBuf>) -> Result<DirectionalSet<ImageF64>> {
    paths.try_map(|direction, path| {
        debug!("loading {direction} image {}", path.display());
        load_grayscale_plane(path)
    })
}

/// Build a normal map from in-memory d-lit images.
pub fn create_from_images(
    images: &DirectionalSet<DynamicImage>,
    options: &ReconstructOptions,
) -> Result<NormalMap> {
    let planes = images.try_map(|_, image| Ok::<_, NormalMapError>(img::to_array(image)))?;
    normal::reconstruct(&planes, options)
}

/// Build a normal map from d-lit image files.
pub fn create_from_files(
    paths: &DirectionalSet<PathBuf>,
    options: &ReconstructOptions,
) -> Result<NormalMap> {
    let planes = load_directional_images(paths)?;
    normal::reconstruct(&planes, options)
}

/// Encode `map` at `depth` into an 8-bit RGB(A) image.
pub fn encode_to_image(
    map: &NormalMap,
    depth: Depth,
    alpha: Option<&ImageF64>,
) -> Result<DynamicImage> {
    let encoded = normal::encode(map, depth);
    img::to_image(&encoded.into_planes(), alpha)
}

/// Decode an RGB(A) image produced at `depth`; alpha, if any, is discarded.
pub fn decode_from_image(image: &DynamicImage, depth: Depth) -> Result<NormalMap> {
    let encoded = EncodedMap::from_planes(img::split_channels(image));
    normal::decode(&encoded, depth)
}

/// Write `map` to `path` at `depth`, optionally with an alpha channel.
pub fn save_normal_map(
    map: &NormalMap,
    path: &Path,
    depth: Depth,
    alpha: Option<&ImageF64>,
) -> Result<()> {
    let image = encode_to_image(map, depth, alpha)?;
    save_image(&image, path)?;
    info!(
        "saved {}x{} normal map to {} (depth {depth})",
        map.width(),
        map.height(),
        path.display()
    );
    Ok(())
}

/// Read a normal map image written at `depth`.
pub fn load_normal_map(path: &Path, depth: Depth) -> Result<NormalMap> {
    let image = load_image(path)?;
    decode_from_image(&image, depth)
}

/// Reload the map stored at `path` and compare it with `map`.
pub fn verify_round_trip(map: &NormalMap, path: &Path, depth: Depth) -> Result<Equivalence> {
    let reloaded = load_normal_map(path, depth)?;
    let eq = map.compare(&reloaded, depth)?;
    debug!(
        "round trip through {}: max diff {:.3} levels (tolerance {:.3})",
        path.display(),
        eq.max_diff_levels,
        eq.tolerance_levels
    );
    Ok(eq)
}
