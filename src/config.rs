//! 仿真配置
//!
//! 所有常量都以具名字段给出，可从 JSON 文件加载并由命令行覆盖。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::SimTime;
use crate::stream::ForwardingPolicy;
use crate::topo::random_overlay::OverlayOpts;

/// 仿真配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 客户端数量 N
    pub clients: usize,
    /// 每个节点主动选择的邻居数 t
    pub fanout: usize,
    /// 拓扑随机数种子
    pub seed: u64,
    /// 位置平面边长
    pub plane_side: f64,
    /// 数据块大小（KB）
    pub block_size_kb: f64,
    /// 服务器每次触发生成的块数
    pub batch_size: u32,
    /// 每个节点的缓存容量（块）
    pub cache_size: usize,
    pub min_bandwidth_kbps: f64,
    pub max_bandwidth_kbps: f64,
    /// 判定流畅所需的连续块数 M
    pub smooth_threshold: u64,
    /// 仿真时长（秒）
    pub horizon_secs: f64,
    /// 生成间隔（秒）；`None` 表示只生成一批
    pub generate_interval_secs: Option<f64>,
    pub forwarding: ForwardingPolicy,
    /// 生成后去掉平行链路
    pub simple_graph: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            clients: 100,
            fanout: 10,
            seed: 1,
            plane_side: 1000.0,
            block_size_kb: 1.0,
            batch_size: 30,
            cache_size: 50,
            min_bandwidth_kbps: 20.0,
            max_bandwidth_kbps: 100.0,
            smooth_threshold: 5,
            horizon_secs: 10.0,
            generate_interval_secs: Some(1.0),
            forwarding: ForwardingPolicy::PushOnly,
            simple_graph: false,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

impl SimConfig {
    /// 从 JSON 文件加载，缺失字段取默认值
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let load_err = |reason: String| ConfigError::Load {
            path: path.display().to_string(),
            reason,
        };
        let raw = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| load_err(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fanout > 0 && self.fanout >= self.clients {
            return Err(ConfigError::FanoutUnsatisfiable {
                fanout: self.fanout,
                clients: self.clients,
            });
        }
        let (min, max) = (self.min_bandwidth_kbps, self.max_bandwidth_kbps);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidBandwidthBounds { min, max });
        }
        if self.cache_size == 0 {
            return Err(ConfigError::Zero { field: "cache_size" });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Zero { field: "batch_size" });
        }
        if self.smooth_threshold == 0 {
            return Err(ConfigError::Zero {
                field: "smooth_threshold",
            });
        }
        positive("block_size_kb", self.block_size_kb)?;
        positive("plane_side", self.plane_side)?;
        if let Some(interval) = self.generate_interval_secs {
            positive("generate_interval_secs", interval)?;
            // 间隔按纳秒取整，取整为 0 会让定时器退化为单次触发。
            if SimTime::from_secs_f64(interval) == SimTime::ZERO {
                return Err(ConfigError::NotPositive {
                    field: "generate_interval_secs",
                    value: interval,
                });
            }
        }
        let horizon = self.horizon_secs;
        if !(horizon.is_finite() && horizon >= 0.0)
            || (horizon > 0.0 && SimTime::from_secs_f64(horizon) == SimTime::ZERO)
        {
            return Err(ConfigError::InvalidHorizon(horizon));
        }
        Ok(())
    }

    pub fn horizon(&self) -> SimTime {
        SimTime::from_secs_f64(self.horizon_secs)
    }

    pub fn generate_interval(&self) -> Option<SimTime> {
        self.generate_interval_secs.map(SimTime::from_secs_f64)
    }

    pub fn overlay_opts(&self) -> OverlayOpts {
        OverlayOpts {
            clients: self.clients,
            fanout: self.fanout,
            plane_side: self.plane_side,
            min_bandwidth_kbps: self.min_bandwidth_kbps,
            max_bandwidth_kbps: self.max_bandwidth_kbps,
            cache_size: self.cache_size,
        }
    }
}
