//! 转发策略

use serde::{Deserialize, Serialize};

/// 节点收到数据块之后的行为
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ForwardingPolicy {
    /// 只由服务器推送给直接邻居，收到的块不再转发
    #[default]
    PushOnly,
    /// 客户端首次收到某块时，转发给除发送方和服务器以外的所有邻居
    PushThenRelay,
    /// 客户端收到超出连续指针的块时，向除发送方以外的邻居请求缺失的期望块
    PullOnMiss,
}
