//! 数据块传输事件

use super::stream_world::StreamWorld;
use crate::net::{BlockId, NodeId};
use crate::sim::{Event, Simulator, World};

/// 事件：一个块沿 `from -> to` 到达 `to`。
#[derive(Debug)]
pub struct TransmitBlock {
    pub from: NodeId,
    pub to: NodeId,
    pub block: BlockId,
}

impl Event for TransmitBlock {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let TransmitBlock { from, to, block } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<StreamWorld>()
            .expect("world must be StreamWorld");
        w.on_transmit(from, to, block, sim);
    }
}
