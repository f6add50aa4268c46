//! Quantization-aware equivalence of orientation data.
//!
//! Storing a map in 8-bit channels rounds every value by up to half a level,
//! and depth compression inflates the `z` error by `1 / depth` on decode. Two
//! maps are equivalent when their largest elementwise difference, measured in
//! 8-bit levels, stays below `max(1 / depth, 2.01)`.
//!
//! The test is symmetric but not transitive: `a ≈ b` and `b ≈ c` do not imply
//! `a ≈ c`.
use super::codec::Depth;
use super::map::NormalMap;
use crate::error::{NormalMapError, Result};
use crate::image::{ImageF64, ImageView};
use serde::Serialize;

/// Floor of the tolerance in 8-bit levels.
pub const MIN_TOLERANCE_LEVELS: f64 = 2.01;

/// Outcome of a comparison, with the measured difference kept for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalence {
    /// Largest elementwise difference scaled to 8-bit levels (`|a − b| · 255`).
    pub max_diff_levels: f64,
    /// Threshold the difference must stay strictly below.
    pub tolerance_levels: f64,
    pub equivalent: bool,
}

impl Equivalence {
    fn from_max_diff(max_diff: f64, depth: Depth) -> Self {
        let max_diff_levels = max_diff * 255.0;
        let tolerance_levels = tolerance_levels(depth);
        Self {
            max_diff_levels,
            tolerance_levels,
            equivalent: max_diff_levels < tolerance_levels,
        }
    }
}

/// Tolerance in 8-bit levels for maps stored at `depth`.
pub fn tolerance_levels(depth: Depth) -> f64 {
    (1.0 / depth.get()).max(MIN_TOLERANCE_LEVELS)
}

/// Compare two maps channel by channel.
pub fn compare(a: &NormalMap, b: &NormalMap, depth: Depth) -> Result<Equivalence> {
    let mut max_diff: f64 = 0.0;
    for (pa, pb) in a.channels().into_iter().zip(b.channels()) {
        max_diff = max_diff.max(max_abs_diff(pa, pb)?);
    }
    Ok(Equivalence::from_max_diff(max_diff, depth))
}

/// Compare two single planes, e.g. a gray image before and after an 8-bit trip.
pub fn compare_planes(a: &ImageF64, b: &ImageF64, depth: Depth) -> Result<Equivalence> {
    Ok(Equivalence::from_max_diff(max_abs_diff(a, b)?, depth))
}

/// `true` when the maps are equivalent; maps of different shape never are.
pub fn equivalent(a: &NormalMap, b: &NormalMap, depth: Depth) -> bool {
    compare(a, b, depth).is_ok_and(|eq| eq.equivalent)
}

/// Plane counterpart of [`equivalent`].
pub fn planes_equivalent(a: &ImageF64, b: &ImageF64, depth: Depth) -> bool {
    compare_planes(a, b, depth).is_ok_and(|eq| eq.equivalent)
}

/// Largest `|a − b|`; a NaN anywhere yields infinity.
fn max_abs_diff(a: &ImageF64, b: &ImageF64) -> Result<f64> {
    if !a.same_shape(b) {
        return Err(NormalMapError::ShapeMismatch {
            expected: a.shape(),
            found: b.shape(),
        });
    }
    let mut max_diff: f64 = 0.0;
    for (ra, rb) in a.rows().zip(b.rows()) {
        for (&va, &vb) in ra.iter().zip(rb) {
            let d = (va - vb).abs();
            if d.is_nan() {
                return Ok(f64::INFINITY);
            }
            max_diff = max_diff.max(d);
        }
    }
    Ok(max_diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(v: f64) -> NormalMap {
        NormalMap::from_planes(
            ImageF64::filled(2, 2, v),
            ImageF64::filled(2, 2, v),
            ImageF64::filled(2, 2, v),
        )
        .unwrap()
    }

    #[test]
    fn tolerance_has_a_floor() {
        assert_eq!(tolerance_levels(Depth::FULL), 2.01);
        assert_eq!(tolerance_levels(Depth::HALF), 2.01);
        assert_eq!(tolerance_levels(Depth::new(0.25).unwrap()), 4.0);
    }

    #[test]
    fn two_levels_pass_three_fail_at_full_depth() {
        let a = flat(0.0);
        assert!(equivalent(&a, &flat(2.0 / 255.0), Depth::FULL));
        assert!(!equivalent(&a, &flat(3.0 / 255.0), Depth::FULL));
        // looser budget at small depth
        assert!(equivalent(&a, &flat(3.0 / 255.0), Depth::new(0.25).unwrap()));
    }

    #[test]
    fn reports_measured_difference() {
        let a = flat(0.0);
        let mut b = flat(0.0);
        b.z.set(1, 1, -1.0 / 255.0);
        let eq = a.compare(&b, Depth::HALF).unwrap();
        assert!((eq.max_diff_levels - 1.0).abs() < 1e-9);
        assert!(eq.equivalent);
        assert_eq!(eq, b.compare(&a, Depth::HALF).unwrap());
    }

    #[test]
    fn shape_mismatch_is_not_equivalent() {
        let a = flat(0.0);
        let b = NormalMap::from_planes(
            ImageF64::new(3, 2),
            ImageF64::new(3, 2),
            ImageF64::new(3, 2),
        )
        .unwrap();
        assert!(!equivalent(&a, &b, Depth::FULL));
        assert!(matches!(
            compare(&a, &b, Depth::FULL),
            Err(NormalMapError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn nan_is_never_equivalent() {
        let a = flat(0.0);
        let mut b = flat(0.0);
        b.x.set(0, 0, f64::NAN);
        let eq = compare(&a, &b, Depth::FULL).unwrap();
        assert!(eq.max_diff_levels.is_infinite());
        assert!(!eq.equivalent);
    }
}
