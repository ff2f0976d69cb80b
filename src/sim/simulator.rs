//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    processed: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 已执行的事件总数
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// 调度事件在指定时间执行
    ///
    /// 事件时间不得早于当前时钟，否则因果顺序被破坏。
    #[tracing::instrument(level = "trace", skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        assert!(
            at >= self.now,
            "event scheduled in the past: at={:?} now={:?}",
            at,
            self.now
        );
        let seq = self.next_seq;
        trace!(now = ?self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        trace!(queue_size = self.q.len(), "事件已加入队列");
    }

    fn step(&mut self, world: &mut dyn World) -> bool {
        let Some(item) = self.q.pop() else {
            return false;
        };
        self.processed += 1;
        self.now = item.at;
        trace!(
            event_num = self.processed,
            now = ?self.now,
            seq = item.seq,
            remaining_queue = self.q.len(),
            "执行事件"
        );
        item.ev.execute(self, world);
        world.on_tick(self);
        true
    }

    /// 只要时钟仍小于 `horizon` 就继续弹出并执行下一个事件。
    ///
    /// 弹出的事件总会完整执行，即使其时间已达到或超过 `horizon`；
    /// 它新调度的事件留在队列中，不再被执行。
    #[tracing::instrument(skip(self, world), fields(horizon = ?horizon))]
    pub fn run_until(&mut self, horizon: SimTime, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        let start = self.processed;
        while self.now < horizon {
            if !self.step(world) {
                break;
            }
        }
        info!(
            events = self.processed - start,
            final_time = ?self.now,
            remaining_queue = self.q.len(),
            "✅ 仿真结束"
        );
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        debug!(now = ?self.now, queue_size = self.q.len(), "初始状态");

        let start = self.processed;
        while self.step(world) {}

        info!(
            total_events = self.processed - start,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
    }
}
