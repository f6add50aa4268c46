use crate::normal::{Depth, ReconstructOptions};
use crate::types::DirectionalSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration for the `unflatten` tool.
///
/// Every field is optional in the JSON file; command-line flags take
/// precedence over values loaded here.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UnflattenConfig {
    /// D-lit input images keyed by direction.
    pub inputs: DirectionalSet<PathBuf>,
    pub output: PathBuf,
    /// Grayscale image copied into the alpha channel of the result.
    pub alpha: Option<PathBuf>,
    pub depth: Depth,
    pub reconstruct: ReconstructOptions,
    /// Where to write the JSON run report.
    pub report: Option<PathBuf>,
    /// Reload the written map and check it against the in-memory one.
    pub verify: bool,
}

impl Default for UnflattenConfig {
    fn default() -> Self {
        Self {
            inputs: DirectionalSet::default(),
            output: PathBuf::from("result.png"),
            alpha: None,
            depth: Depth::default(),
            reconstruct: ReconstructOptions::default(),
            report: None,
            verify: false,
        }
    }
}

pub fn load_config(path: &Path) -> Result<UnflattenConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
