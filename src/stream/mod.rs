//! 数据块分发模块
//!
//! 服务器周期性生成数据块并推送给邻居；可选的转发与拉取策略由 `ForwardingPolicy` 选择。

mod event_log;
mod generate_blocks;
mod policy;
mod request_block;
mod stats;
mod stream_world;
mod transmit_block;

pub use event_log::{EventKind, EventLog, EventRecord};
pub use generate_blocks::GenerateBlocks;
pub use policy::ForwardingPolicy;
pub use request_block::RequestBlock;
pub use stats::StreamStats;
pub use stream_world::StreamWorld;
pub use transmit_block::TransmitBlock;
