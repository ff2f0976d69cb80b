//! 世界 trait

use super::simulator::Simulator;
use std::any::Any;

/// 仿真世界：持有业务状态，由事件向下转型后访问。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// 每执行完一个事件调用一次
    fn on_tick(&mut self, _sim: &mut Simulator) {}
}
