//! 网络模型模块
//!
//! 此模块包含叠加网络的核心组件，如节点、链路和拓扑。

// 子模块声明
mod id;
mod link;
mod peer;
mod topology;

// 重新导出公共接口
pub use id::{BlockId, LinkId, NodeId};
pub use link::{BandwidthModel, Link};
pub use peer::{Peer, Position, Receipt};
pub use topology::Topology;
