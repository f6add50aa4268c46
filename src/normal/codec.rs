//! Depth codec: orientation planes ↔ unit-interval planes for 8-bit storage.
//!
//! `x` and `y` are remapped from [-1, 1] to [0, 1]. `z` is compressed into
//! `[1 − depth, 1]`; `depth = 1` spends the whole channel on `z`, smaller
//! values push the blue channel towards white. Decoding applies the exact
//! algebraic inverse and must use the depth the map was encoded with.
use super::map::NormalMap;
use crate::error::{NormalMapError, Result};
use crate::image::ImageF64;
use serde::{Deserialize, Serialize};

/// Compression factor for the `z` channel, a finite value in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Depth(f64);

impl Depth {
    pub const FULL: Depth = Depth(1.0);
    pub const HALF: Depth = Depth(0.5);

    pub fn new(depth: f64) -> Result<Self> {
        if depth.is_finite() && depth > 0.0 && depth <= 1.0 {
            Ok(Depth(depth))
        } else {
            Err(NormalMapError::InvalidDepth { depth })
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Constant offset added to every encoded `z`.
    #[inline]
    pub fn offset(self) -> f64 {
        1.0 - self.0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::HALF
    }
}

impl TryFrom<f64> for Depth {
    type Error = NormalMapError;

    fn try_from(value: f64) -> Result<Self> {
        Depth::new(value)
    }
}

impl From<Depth> for f64 {
    fn from(depth: Depth) -> f64 {
        depth.0
    }
}

impl std::str::FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|e| format!("invalid depth {s:?}: {e}"))?;
        Depth::new(value).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoded channels in [0, 1], ready for [`crate::image::to_image`].
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedMap {
    pub r: ImageF64,
    pub g: ImageF64,
    pub b: ImageF64,
}

impl EncodedMap {
    pub fn into_planes(self) -> [ImageF64; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_planes([r, g, b]: [ImageF64; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Encode a map for storage. Values are not clamped; in-range maps stay in [0, 1].
pub fn encode(map: &NormalMap, depth: Depth) -> EncodedMap {
    let d = depth.get();
    let offset = depth.offset();
    EncodedMap {
        r: map.x.map(|x| (x + 1.0) / 2.0),
        g: map.y.map(|y| (y + 1.0) / 2.0),
        b: map.z.map(|z| z * d + offset),
    }
}

/// Recover a map from encoded channels produced with the same `depth`.
pub fn decode(encoded: &EncodedMap, depth: Depth) -> Result<NormalMap> {
    let d = depth.get();
    let offset = depth.offset();
    NormalMap::from_planes(
        encoded.r.map(|r| r * 2.0 - 1.0),
        encoded.g.map(|g| g * 2.0 - 1.0),
        encoded.b.map(|b| (b - offset) / d),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_pixel(x: f64, y: f64, z: f64) -> NormalMap {
        NormalMap::from_planes(
            ImageF64::filled(1, 1, x),
            ImageF64::filled(1, 1, y),
            ImageF64::filled(1, 1, z),
        )
        .unwrap()
    }

    #[test]
    fn depth_must_be_in_unit_interval() {
        assert!(Depth::new(1.0).is_ok());
        assert!(Depth::new(1e-6).is_ok());
        for bad in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert!(Depth::new(bad).is_err(), "{bad} should be rejected");
        }
        assert_eq!("0.25".parse::<Depth>().unwrap().get(), 0.25);
        assert!("zero".parse::<Depth>().is_err());
        assert!("0".parse::<Depth>().is_err());
    }

    #[test]
    fn encode_compresses_z_towards_one() {
        let map = single_pixel(-1.0, 1.0, 0.0);
        let enc = encode(&map, Depth::new(0.25).unwrap());
        assert_eq!(enc.r.get(0, 0), 0.0);
        assert_eq!(enc.g.get(0, 0), 1.0);
        assert_eq!(enc.b.get(0, 0), 0.75);

        let full = encode(&map, Depth::FULL);
        assert_eq!(full.b.get(0, 0), 0.0);
    }

    #[test]
    fn encode_leaves_source_untouched() {
        let map = single_pixel(0.3, -0.2, 0.9);
        let before = map.clone();
        let _ = encode(&map, Depth::HALF);
        assert_eq!(map, before);
    }

    #[test]
    fn decode_inverts_encode() {
        let map = single_pixel(0.3, -0.7, 0.42);
        for depth in [1.0, 0.5, 0.1] {
            let depth = Depth::new(depth).unwrap();
            let back = decode(&encode(&map, depth), depth).unwrap();
            assert_relative_eq!(back.x.get(0, 0), 0.3, epsilon = 1e-12);
            assert_relative_eq!(back.y.get(0, 0), -0.7, epsilon = 1e-12);
            assert_relative_eq!(back.z.get(0, 0), 0.42, epsilon = 1e-12);
        }
    }

    #[test]
    fn depth_deserializes_with_validation() {
        let depth: Depth = serde_json::from_str("0.125").unwrap();
        assert_eq!(depth.get(), 0.125);
        assert!(serde_json::from_str::<Depth>("2.0").is_err());
    }
}
