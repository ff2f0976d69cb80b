//! 仿真后指标

mod smoothness;

pub use smoothness::{SmoothnessReport, contiguous_run, evaluate, smoothness};
