//! Run diagnostics: stage timings and the serializable run report.

pub mod report;
pub mod timing;

pub use report::{ChannelStats, RunReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
