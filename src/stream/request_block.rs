//! 数据块请求事件（拉取路径）

use super::stream_world::StreamWorld;
use crate::net::{BlockId, NodeId};
use crate::sim::{Event, Simulator, World};

/// 事件：`requester` 向 `holder` 请求 `block`。
#[derive(Debug)]
pub struct RequestBlock {
    pub requester: NodeId,
    pub holder: NodeId,
    pub block: BlockId,
}

impl Event for RequestBlock {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let RequestBlock {
            requester,
            holder,
            block,
        } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<StreamWorld>()
            .expect("world must be StreamWorld");
        w.on_request(requester, holder, block, sim);
    }
}
