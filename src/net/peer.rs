//! 节点类型
//!
//! 定义节点的位置、邻居表、有界缓存与连续交付指针。

use super::id::{BlockId, NodeId};
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// 平面上的位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// 一次 `receive` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// 该节点此前从未收到过这个块。
    ///
    /// 未开启 `track_seen` 时按有界规则判断：块不低于连续指针且不在缓存中。
    /// 被淘汰后再次到达的块会被视为首次收到。
    pub first_seen: bool,
    /// 连续交付指针因此前进
    pub advanced: bool,
    /// 被 FIFO 淘汰的最旧块
    pub evicted: Option<BlockId>,
}

/// 叠加网络中的一个节点（服务器或客户端）
#[derive(Debug, Clone)]
pub struct Peer {
    id: NodeId,
    pos: Position,
    neighbors: Vec<NodeId>,
    cache: VecDeque<BlockId>,
    cache_size: usize,
    next_expected: BlockId,
    seen: Option<HashSet<BlockId>>,
}

impl Peer {
    pub fn new(id: NodeId, pos: Position, cache_size: usize) -> Self {
        assert!(cache_size > 0, "cache capacity must be positive");
        Self {
            id,
            pos,
            neighbors: Vec::new(),
            cache: VecDeque::with_capacity(cache_size + 1),
            cache_size,
            next_expected: BlockId::FIRST,
            seen: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    /// 每条出链一项；平行链路会重复出现。
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub(crate) fn neighbors_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.neighbors
    }

    /// 按插入顺序的缓存内容
    pub fn cache(&self) -> &VecDeque<BlockId> {
        &self.cache
    }

    pub fn cache_size(&self) -> usize {
        self.cache_size
    }

    pub fn next_expected(&self) -> BlockId {
        self.next_expected
    }

    /// 开启精确的"已见过"记录（只有转发策略需要；内存随收到的块数增长）。
    pub fn track_seen(&mut self) {
        if self.seen.is_none() {
            self.seen = Some(self.cache.iter().copied().collect());
        }
    }

    pub fn tracks_seen(&self) -> bool {
        self.seen.is_some()
    }

    pub fn has_block(&self, block: BlockId) -> bool {
        self.cache.contains(&block)
    }

    /// 收下一个块：追加到缓存尾部，超出容量时淘汰最旧的一项（严格 FIFO）。
    ///
    /// 只有恰好等于期望值的块才推进连续交付指针；乱序或重复的块保留在缓存中。
    pub fn receive(&mut self, block: BlockId) -> Receipt {
        let first_seen = match &mut self.seen {
            Some(seen) => seen.insert(block),
            None => block >= self.next_expected && !self.cache.contains(&block),
        };
        self.cache.push_back(block);
        let evicted = if self.cache.len() > self.cache_size {
            self.cache.pop_front()
        } else {
            None
        };
        assert!(self.cache.len() <= self.cache_size, "cache over capacity");

        let advanced = block == self.next_expected;
        if advanced {
            self.next_expected = self.next_expected.next();
        }

        trace!(
            node = self.id.0,
            block = block.0,
            next_expected = self.next_expected.0,
            ?evicted,
            "块已入缓存"
        );
        Receipt {
            first_seen,
            advanced,
            evicted,
        }
    }
}
