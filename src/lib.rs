#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod image;
pub mod normal;
pub mod pipeline;
pub mod types;

// Tool support – used by the `unflatten` binary, public for embedding.
pub mod config;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::NormalMapError;
pub use crate::normal::{
    apply_light, compare, decode, encode, equivalent, reconstruct, Depth, EncodedMap,
    Equivalence, NormalMap, ReconstructOptions, ZClosure,
};
pub use crate::pipeline::{create_from_files, load_normal_map, save_normal_map};
pub use crate::types::{Direction, DirectionalSet};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use unflattener::prelude::*;
/// use std::path::{Path, PathBuf};
///
/// # fn main() -> Result<(), NormalMapError> {
/// let inputs = DirectionalSet {
///     left: Some(PathBuf::from("robot-left.png")),
///     right: Some(PathBuf::from("robot-right.png")),
///     ..Default::default()
/// };
/// let map = create_from_files(&inputs, &ReconstructOptions::default())?;
/// save_normal_map(&map, Path::new("result.png"), Depth::HALF, None)?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageF64;
    pub use crate::{
        create_from_files, load_normal_map, save_normal_map, Depth, DirectionalSet,
        NormalMap, NormalMapError, ReconstructOptions,
    };
}
