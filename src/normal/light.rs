use super::map::NormalMap;
use crate::error::{NormalMapError, Result};
use crate::image::ImageF64;
use nalgebra::Vector3;

/// Shade `image` with a directional light using the normals of `map`.
///
/// Not implemented: every call fails with `Unimplemented`, whatever the input.
pub fn apply_light(
    _map: &NormalMap,
    _image: &ImageF64,
    _light: &Vector3<f64>,
) -> Result<ImageF64> {
    Err(NormalMapError::Unimplemented {
        operation: "apply_light",
    })
}
