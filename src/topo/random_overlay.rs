//! 随机叠加网络拓扑构建
//!
//! 每个节点独立地随机选出 `fanout` 个不同的邻居（不含自身），并为每次选择
//! 同时创建两个方向的链路。两端的选择互不协调，所以同一有序节点对之间可能
//! 出现平行链路，这会提高有效出度；需要简单图语义时调用 `Topology::dedup_links`。

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::net::{NodeId, Position, Topology};

/// 随机叠加网络配置选项
#[derive(Debug, Clone)]
pub struct OverlayOpts {
    pub clients: usize,
    pub fanout: usize,
    pub plane_side: f64,
    pub min_bandwidth_kbps: f64,
    pub max_bandwidth_kbps: f64,
    pub cache_size: usize,
}

impl Default for OverlayOpts {
    fn default() -> Self {
        Self {
            clients: 100,
            fanout: 10,
            plane_side: 1000.0,
            min_bandwidth_kbps: 20.0,
            max_bandwidth_kbps: 100.0,
            cache_size: 50,
        }
    }
}

/// 构建随机叠加网络
///
/// 节点 0 为服务器，1..=clients 为客户端；位置是 `[0, plane_side)` 内均匀分布的整数格点。
/// `fanout >= clients`（且 `fanout > 0`）时返回配置错误，而不会陷入死循环。
#[tracing::instrument(skip(opts, rng), fields(clients = opts.clients, fanout = opts.fanout))]
pub fn build_random_overlay<R: Rng + ?Sized>(
    opts: &OverlayOpts,
    rng: &mut R,
) -> Result<Topology, ConfigError> {
    if opts.fanout > 0 && opts.fanout >= opts.clients {
        return Err(ConfigError::FanoutUnsatisfiable {
            fanout: opts.fanout,
            clients: opts.clients,
        });
    }

    let mut topo = Topology::new(
        opts.plane_side,
        opts.min_bandwidth_kbps,
        opts.max_bandwidth_kbps,
    );
    let cells = opts.plane_side.floor().max(1.0) as u64;
    for _ in 0..=opts.clients {
        let x = rng.gen_range(0..cells) as f64;
        let y = rng.gen_range(0..cells) as f64;
        topo.add_node(Position::new(x, y), opts.cache_size);
    }

    let nodes = topo.len();
    for i in 0..nodes {
        let mut selected = HashSet::with_capacity(opts.fanout);
        while selected.len() < opts.fanout {
            let neighbor = rng.gen_range(0..nodes);
            if neighbor != i && selected.insert(neighbor) {
                topo.connect_pair(NodeId(i), NodeId(neighbor));
            }
        }
        debug!(node = i, picked = ?selected, "邻居已选定");
    }

    match topo.bandwidth_range() {
        Some((lo, hi)) => info!(
            nodes,
            links = topo.links().len(),
            min_kbps = lo,
            max_kbps = hi,
            "拓扑已生成"
        ),
        None => info!(nodes, "拓扑已生成（无链路）"),
    }
    Ok(topo)
}
