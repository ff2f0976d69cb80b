//! 调度事件
//!
//! 队列中的一项：执行时间 + 插入序号 + 事件对象。

use super::event::Event;
use super::time::SimTime;
use std::cmp::{Ordering, Reverse};

/// 调度事件。
///
/// 排序键为 `(at, seq)`：时间早者优先，同一时刻按插入顺序先进先出。
pub struct ScheduledEvent {
    pub(crate) at: SimTime,
    pub(crate) seq: u64,
    pub(crate) ev: Box<dyn Event>,
}

impl ScheduledEvent {
    // BinaryHeap 是 max-heap，用 Reverse 得到最小键优先。
    fn key(&self) -> Reverse<(SimTime, u64)> {
        Reverse((self.at, self.seq))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}
