//! JSON run configuration for the command-line tool.
pub mod unflatten;

pub use unflatten::{load_config, UnflattenConfig};
