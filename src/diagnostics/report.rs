use super::TimingBreakdown;
use crate::normal::{Depth, Equivalence, NormalMap, ZClosure};
use crate::types::Direction;
use serde::Serialize;
use std::path::PathBuf;

/// Summary of one unflatten run, written by `unflatten --report`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub inputs: Vec<Direction>,
    pub width: usize,
    pub height: usize,
    pub depth: Depth,
    pub z_closure: ZClosure,
    pub output: PathBuf,
    pub channels: ChannelStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Equivalence>,
    pub timings: TimingBreakdown,
}

/// Value range of each orientation channel, `[min, max]`.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ChannelStats {
    pub x: Option<[f64; 2]>,
    pub y: Option<[f64; 2]>,
    pub z: Option<[f64; 2]>,
}

impl ChannelStats {
    pub fn of(map: &NormalMap) -> Self {
        let range = |p: &crate::image::ImageF64| p.min_max().map(|(lo, hi)| [lo, hi]);
        Self {
            x: range(&map.x),
            y: range(&map.y),
            z: range(&map.z),
        }
    }
}
