use super::codec::Depth;
use super::compare::{self, Equivalence};
use crate::error::{NormalMapError, Result};
use crate::image::{ImageF64, ImageView};
use nalgebra::Vector3;

/// Per-pixel surface orientation stored as three planes.
///
/// `x` and `y` nominally lie in [-1, 1], `z` in [0, 1]. The map is always
/// freshly allocated by reconstruction or decoding and owned by the caller;
/// encoding reads it without modification.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalMap {
    pub x: ImageF64,
    pub y: ImageF64,
    pub z: ImageF64,
}

impl NormalMap {
    /// Assemble a map from three planes of identical shape.
    pub fn from_planes(x: ImageF64, y: ImageF64, z: ImageF64) -> Result<Self> {
        for plane in [&y, &z] {
            if !plane.same_shape(&x) {
                return Err(NormalMapError::ShapeMismatch {
                    expected: x.shape(),
                    found: plane.shape(),
                });
            }
        }
        Ok(Self { x, y, z })
    }

    pub fn width(&self) -> usize {
        self.x.w
    }

    pub fn height(&self) -> usize {
        self.x.h
    }

    /// Array-style shape `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    pub fn channels(&self) -> [&ImageF64; 3] {
        [&self.x, &self.y, &self.z]
    }

    pub fn into_channels(self) -> [ImageF64; 3] {
        [self.x, self.y, self.z]
    }

    /// Orientation vector at pixel (x, y).
    pub fn normal_at(&self, x: usize, y: usize) -> Vector3<f64> {
        Vector3::new(self.x.get(x, y), self.y.get(x, y), self.z.get(x, y))
    }

    /// Compare with `other` under the quantization budget of `depth`.
    pub fn compare(&self, other: &NormalMap, depth: Depth) -> Result<Equivalence> {
        compare::compare(self, other, depth)
    }
}
