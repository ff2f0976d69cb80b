//! 数据块生成事件

use super::stream_world::StreamWorld;
use crate::sim::{Event, Simulator, World};

/// 事件：服务器的周期性生成定时器触发。
#[derive(Debug)]
pub struct GenerateBlocks;

impl Event for GenerateBlocks {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<StreamWorld>()
            .expect("world must be StreamWorld");
        w.on_generate(sim);
    }
}
