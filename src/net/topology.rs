//! 叠加网络拓扑
//!
//! 持有全部节点与有向链路。带宽总是由节点位置重新计算，链路上记录的值仅用于导出。

use std::collections::HashSet;

use super::id::{LinkId, NodeId};
use super::link::{BandwidthModel, Link};
use super::peer::{Peer, Position};
use crate::sim::SimTime;
use tracing::debug;

/// 叠加网络拓扑
#[derive(Debug, Clone)]
pub struct Topology {
    peers: Vec<Peer>,
    links: Vec<Link>,
    model: BandwidthModel,
    plane_side: f64,
}

impl Topology {
    pub fn new(plane_side: f64, min_kbps: f64, max_kbps: f64) -> Self {
        Self {
            peers: Vec::new(),
            links: Vec::new(),
            model: BandwidthModel::new(plane_side, min_kbps, max_kbps),
            plane_side,
        }
    }

    /// 添加节点；第一个节点是服务器
    pub fn add_node(&mut self, pos: Position, cache_size: usize) -> NodeId {
        let id = NodeId(self.peers.len());
        self.peers.push(Peer::new(id, pos, cache_size));
        id
    }

    /// 创建单向链路 `from -> to`，不检查是否已存在。
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> LinkId {
        let bw = self.bandwidth(from, to);
        let id = LinkId(self.links.len());
        self.links.push(Link::new(from, to, bw));
        self.peers[from.0].neighbors_mut().push(to);
        id
    }

    /// 同时创建两个方向的链路
    pub fn connect_pair(&mut self, a: NodeId, b: NodeId) -> (LinkId, LinkId) {
        (self.connect(a, b), self.connect(b, a))
    }

    /// 所有节点开启精确的"已见过"记录
    pub fn track_seen(&mut self) {
        for peer in &mut self.peers {
            peer.track_seen();
        }
    }

    /// 去掉重复的平行链路，使拓扑成为简单有向图。
    pub fn dedup_links(&mut self) {
        let mut seen = HashSet::new();
        let before = self.links.len();
        self.links.retain(|l| seen.insert((l.from, l.to)));
        for peer in &mut self.peers {
            let mut mine = HashSet::new();
            peer.neighbors_mut().retain(|n| mine.insert(*n));
        }
        debug!(before, after = self.links.len(), "平行链路已去重");
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn server(&self) -> NodeId {
        NodeId::SERVER
    }

    pub fn clients(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter().skip(1)
    }

    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    pub fn peer(&self, id: NodeId) -> &Peer {
        &self.peers[id.0]
    }

    pub fn peer_mut(&mut self, id: NodeId) -> &mut Peer {
        &mut self.peers[id.0]
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn plane_side(&self) -> f64 {
        self.plane_side
    }

    pub fn model(&self) -> &BandwidthModel {
        &self.model
    }

    /// 由两个节点的位置计算带宽（KB/s）
    pub fn bandwidth(&self, a: NodeId, b: NodeId) -> f64 {
        self.model
            .bandwidth(self.peers[a.0].pos(), self.peers[b.0].pos())
    }

    /// 在 `a -> b` 上传输一个大小为 `block_kb` 的块的时延
    pub fn latency(&self, a: NodeId, b: NodeId, block_kb: f64) -> SimTime {
        self.model.tx_time(block_kb, self.bandwidth(a, b))
    }

    /// 链路带宽的观测范围；无链路时为 `None`
    pub fn bandwidth_range(&self) -> Option<(f64, f64)> {
        self.links.iter().fold(None, |acc, l| {
            let bw = l.bandwidth_kbps;
            Some(match acc {
                None => (bw, bw),
                Some((lo, hi)) => (lo.min(bw), hi.max(bw)),
            })
        })
    }
}
