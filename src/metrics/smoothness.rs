//! 流畅度评估
//!
//! 仿真结束后读取客户端的最终状态，计算二值流畅度及其平均值。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::net::{Peer, Topology};

/// 从节点最终的连续指针开始按插入顺序扫描缓存，返回扫描过程中最长的连续计数。
///
/// 等于期望值的项使计数加一并推进期望值；不匹配的项把计数清零，期望值保持不变。
pub fn contiguous_run(peer: &Peer) -> u64 {
    let mut expected = peer.next_expected();
    let mut run = 0u64;
    let mut longest = 0u64;
    for &block in peer.cache() {
        if block == expected {
            run += 1;
            expected = expected.next();
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// 连续计数达到 `threshold` 时为 1.0，否则为 0.0
pub fn smoothness(peer: &Peer, threshold: u64) -> f64 {
    if contiguous_run(peer) >= threshold {
        1.0
    } else {
        0.0
    }
}

/// 流畅度报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothnessReport {
    pub threshold: u64,
    /// 客户端 id -> 0.0 / 1.0
    pub per_client: BTreeMap<usize, f64>,
    pub smooth_clients: usize,
    pub clients: usize,
    /// 平均流畅度（百分比）；没有客户端时为 0
    pub average_percent: f64,
}

/// 评估所有客户端（不含服务器）
pub fn evaluate(topo: &Topology, threshold: u64) -> SmoothnessReport {
    let per_client: BTreeMap<usize, f64> = topo
        .clients()
        .map(|p| (p.id().0, smoothness(p, threshold)))
        .collect();
    let clients = per_client.len();
    let smooth_clients = per_client.values().filter(|&&s| s >= 1.0).count();
    let average_percent = if clients == 0 {
        0.0
    } else {
        smooth_clients as f64 / clients as f64 * 100.0
    };
    SmoothnessReport {
        threshold,
        per_client,
        smooth_clients,
        clients,
        average_percent,
    }
}
