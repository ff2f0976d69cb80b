//! 链路类型
//!
//! 定义有向链路以及由距离推导带宽的模型。

use super::id::NodeId;
use super::peer::Position;
use crate::sim::SimTime;

/// 有向链路，带宽单位 KB/s
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    pub bandwidth_kbps: f64,
}

impl Link {
    pub fn new(from: NodeId, to: NodeId, bandwidth_kbps: f64) -> Self {
        Self {
            from,
            to,
            bandwidth_kbps,
        }
    }
}

/// 带宽模型：`clamp((max / D_max) * distance, min, max)`，`D_max` 为平面对角线。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthModel {
    pub min_kbps: f64,
    pub max_kbps: f64,
    pub d_max: f64,
}

impl BandwidthModel {
    pub fn new(plane_side: f64, min_kbps: f64, max_kbps: f64) -> Self {
        Self {
            min_kbps,
            max_kbps,
            d_max: plane_side * std::f64::consts::SQRT_2,
        }
    }

    pub fn bandwidth(&self, a: Position, b: Position) -> f64 {
        let raw = (self.max_kbps / self.d_max) * a.distance(b);
        raw.clamp(self.min_kbps, self.max_kbps)
    }

    /// 传输一个数据块所需时间：`block_kb / bandwidth` 秒
    pub(crate) fn tx_time(&self, block_kb: f64, bandwidth_kbps: f64) -> SimTime {
        assert!(
            bandwidth_kbps > 0.0,
            "non-positive bandwidth reached latency computation: {bandwidth_kbps}"
        );
        SimTime::from_secs_f64(block_kb / bandwidth_kbps)
    }
}
