use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::metrics::SmoothnessReport;
use crate::net::Topology;
use crate::run::SimOutcome;
use crate::stream::{EventRecord, StreamStats};

/// 节点类型（用于可视化区分 server/client）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VizNodeKind {
    Server,
    Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizNodeInfo {
    pub id: usize,
    pub kind: VizNodeKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizLinkInfo {
    pub from: usize,
    pub to: usize,
    /// 单向链路带宽（KB/s）
    pub bandwidth_kbps: f64,
}

/// 拓扑快照：节点位置 + 链路表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizTopology {
    pub plane_side: f64,
    pub nodes: Vec<VizNodeInfo>,
    pub links: Vec<VizLinkInfo>,
}

impl VizTopology {
    pub fn from_topology(topo: &Topology) -> Self {
        let nodes = topo
            .peers()
            .iter()
            .map(|p| VizNodeInfo {
                id: p.id().0,
                kind: if p.id().is_server() {
                    VizNodeKind::Server
                } else {
                    VizNodeKind::Client
                },
                x: p.pos().x,
                y: p.pos().y,
            })
            .collect();
        let links = topo
            .links()
            .iter()
            .map(|l| VizLinkInfo {
                from: l.from.0,
                to: l.to.0,
                bandwidth_kbps: l.bandwidth_kbps,
            })
            .collect();
        Self {
            plane_side: topo.plane_side(),
            nodes,
            links,
        }
    }
}

/// 完整运行报告（JSON），供外部可视化工具回放
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizReport {
    pub config: SimConfig,
    pub topology: VizTopology,
    pub events: Vec<EventRecord>,
    pub stats: StreamStats,
    pub smoothness: SmoothnessReport,
}

impl VizReport {
    pub fn new(cfg: &SimConfig, out: &SimOutcome) -> Self {
        Self {
            config: cfg.clone(),
            topology: VizTopology::from_topology(&out.topo),
            events: out.log.events.clone(),
            stats: out.stats.clone(),
            smoothness: out.report.clone(),
        }
    }
}
