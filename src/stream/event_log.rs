//! 已处理事件日志
//!
//! 按处理顺序记录每个事件，供外部可视化或调试使用。

use serde::{Deserialize, Serialize};

use crate::net::{BlockId, NodeId};
use crate::sim::SimTime;

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Generate,
    Transmit,
    Request,
}

/// 一条已处理事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 仿真时间（纳秒，和 `SimTime.0` 同口径）
    pub t_ns: u64,
    pub kind: EventKind,
    pub source: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockId>,
}

impl EventRecord {
    pub fn time(&self) -> SimTime {
        SimTime(self.t_ns)
    }
}

/// 事件收集器（存内存）
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<EventRecord>,
}

impl EventLog {
    pub fn push(&mut self, rec: EventRecord) {
        self.events.push(rec);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}
