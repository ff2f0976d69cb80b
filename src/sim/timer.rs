//! 周期定时器
//!
//! 描述一个按固定间隔触发的逻辑定时器（间隔 + 下一次触发时间）。

use super::time::SimTime;

/// 周期定时器。
///
/// `interval` 为 `None` 时定时器只触发一次；`until` 之后（含）不再安排触发。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTimer {
    interval: Option<SimTime>,
    next_fire: SimTime,
    until: Option<SimTime>,
    fired: u64,
}

impl PeriodicTimer {
    pub fn new(first_fire: SimTime, interval: Option<SimTime>) -> Self {
        let interval = interval.filter(|i| i.0 > 0);
        Self {
            interval,
            next_fire: first_fire,
            until: None,
            fired: 0,
        }
    }

    /// 只会触发一次的定时器
    pub fn once(at: SimTime) -> Self {
        Self::new(at, None)
    }

    /// 设置截止时间：`next_fire >= until` 的触发不会被安排。
    pub fn with_until(mut self, until: SimTime) -> Self {
        self.until = Some(until);
        self
    }

    pub fn interval(&self) -> Option<SimTime> {
        self.interval
    }

    pub fn next_fire(&self) -> SimTime {
        self.next_fire
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// 首次触发时间（若在截止时间之内）。
    pub fn first(&self) -> Option<SimTime> {
        match self.until {
            Some(until) if self.next_fire >= until => None,
            _ => Some(self.next_fire),
        }
    }

    /// 记录一次在 `now` 的触发，并返回下一次触发时间。
    pub fn fire(&mut self, now: SimTime) -> Option<SimTime> {
        self.fired += 1;
        let interval = self.interval?;
        let next = now.saturating_add(interval);
        if let Some(until) = self.until {
            if next >= until {
                return None;
            }
        }
        self.next_fire = next;
        Some(next)
    }
}
