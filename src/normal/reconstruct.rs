//! Orientation reconstruction from directionally lit (d-lit) images.
//!
//! Each d-lit plane holds, per pixel, the clamped dot product of the surface
//! normal with the unit vector pointing at its light. Subtracting opposite
//! pairs isolates the signed planar components:
//!
//! - `x = right − left`
//! - `y = top − bottom`
//!
//! A missing image is replaced by the baseline of its axis, so an axis with
//! no images contributes zero and an axis with a single image keeps a
//! directional skew. `z` is then derived from `n = x² + y²` by the selected
//! [`ZClosure`].
use super::map::NormalMap;
use crate::error::{NormalMapError, Result};
use crate::image::{ImageF64, ImageView};
use crate::types::{Direction, DirectionalSet};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Rule completing `(x, y)` with a `z` component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZClosure {
    /// `z = sqrt(max(1 − sqrt(n), 0))` for `n > 0`, `z = 1` for `n == 0`.
    ///
    /// This is the formula existing assets were generated with. It is not a
    /// unit-vector closure: it falls off faster than `UnitSphere`.
    #[default]
    Literal,
    /// `z = sqrt(max(1 − n, 0))`, completing `(x, y, z)` to a unit vector
    /// whenever `n <= 1`.
    UnitSphere,
}

impl ZClosure {
    #[inline]
    pub fn z(self, n: f64) -> f64 {
        match self {
            ZClosure::Literal => {
                if n > 0.0 {
                    (1.0 - n.sqrt()).max(0.0).sqrt()
                } else {
                    1.0
                }
            }
            ZClosure::UnitSphere => (1.0 - n).max(0.0).sqrt(),
        }
    }
}

/// Knobs for [`reconstruct`].
///
/// - `horizontal_baseline`: stand-in value for a missing `left`/`right` plane.
/// - `vertical_baseline`: stand-in value for a missing `top`/`bottom` plane.
/// - `z_closure`: how `z` is derived from the planar components.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReconstructOptions {
    pub horizontal_baseline: f64,
    pub vertical_baseline: f64,
    pub z_closure: ZClosure,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            horizontal_baseline: 0.5,
            vertical_baseline: 0.5,
            z_closure: ZClosure::Literal,
        }
    }
}

impl ReconstructOptions {
    pub fn with_baselines(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_baseline = horizontal;
        self.vertical_baseline = vertical;
        self
    }

    pub fn with_z_closure(mut self, z_closure: ZClosure) -> Self {
        self.z_closure = z_closure;
        self
    }
}

/// Check that all present planes share one shape and return it.
pub fn common_shape(planes: &DirectionalSet<ImageF64>) -> Result<(usize, usize)> {
    let mut shape = None;
    for (_, plane) in planes.iter() {
        match shape {
            None => shape = Some(plane.shape()),
            Some(expected) if expected != plane.shape() => {
                return Err(NormalMapError::ShapeMismatch {
                    expected,
                    found: plane.shape(),
                });
            }
            Some(_) => {}
        }
    }
    shape.ok_or(NormalMapError::MissingInput)
}

/// Build a normal map from up to four d-lit planes in [0, 1].
///
/// Fails with `MissingInput` when no plane is present and with
/// `ShapeMismatch` when present planes differ in size; no partial map is
/// produced in either case.
pub fn reconstruct(
    planes: &DirectionalSet<ImageF64>,
    options: &ReconstructOptions,
) -> Result<NormalMap> {
    let (h, w) = common_shape(planes)?;
    debug!(
        "reconstruct: {}x{} from [{}], closure={:?}",
        w,
        h,
        planes
            .iter()
            .map(|(d, _)| d.name())
            .collect::<Vec<_>>()
            .join(", "),
        options.z_closure
    );
    warn_one_sided(planes, Direction::Left, Direction::Right);
    warn_one_sided(planes, Direction::Top, Direction::Bottom);

    let mut x = ImageF64::new(w, h);
    let mut y = ImageF64::new(w, h);
    let mut z = ImageF64::new(w, h);
    if w == 0 || h == 0 {
        return NormalMap::from_planes(x, y, z);
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        x.data
            .par_chunks_mut(w)
            .zip(y.data.par_chunks_mut(w))
            .zip(z.data.par_chunks_mut(w))
            .enumerate()
            .for_each(|(row, ((ox, oy), oz))| fill_row(planes, options, row, ox, oy, oz));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (row, ((ox, oy), oz)) in x
            .data
            .chunks_mut(w)
            .zip(y.data.chunks_mut(w))
            .zip(z.data.chunks_mut(w))
            .enumerate()
        {
            fill_row(planes, options, row, ox, oy, oz);
        }
    }

    NormalMap::from_planes(x, y, z)
}

fn fill_row(
    planes: &DirectionalSet<ImageF64>,
    options: &ReconstructOptions,
    row: usize,
    out_x: &mut [f64],
    out_y: &mut [f64],
    out_z: &mut [f64],
) {
    let top = planes.top.as_ref().map(|p| p.row(row));
    let bottom = planes.bottom.as_ref().map(|p| p.row(row));
    let left = planes.left.as_ref().map(|p| p.row(row));
    let right = planes.right.as_ref().map(|p| p.row(row));
    let hb = options.horizontal_baseline;
    let vb = options.vertical_baseline;

    for col in 0..out_x.len() {
        let sample = |r: Option<&[f64]>, base: f64| r.map_or(base, |r| r[col]);
        let nx = sample(right, hb) - sample(left, hb);
        let ny = sample(top, vb) - sample(bottom, vb);
        out_x[col] = nx;
        out_y[col] = ny;
        out_z[col] = options.z_closure.z(nx * nx + ny * ny);
    }
}

fn warn_one_sided(planes: &DirectionalSet<ImageF64>, a: Direction, b: Direction) {
    match (planes.get(a).is_some(), planes.get(b).is_some()) {
        (true, false) => warn!("{a} image without {b}: {b} falls back to the baseline"),
        (false, true) => warn!("{b} image without {a}: {a} falls back to the baseline"),
        _ => {}
    }
}
