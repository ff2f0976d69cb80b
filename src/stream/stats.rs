//! 统计信息
//!
//! 定义分发过程中的计数器。

use serde::{Deserialize, Serialize};

/// 分发统计信息
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStats {
    pub generated_blocks: u64,
    pub transmissions: u64,
    /// 被接收方乱序或重复收到的块
    pub out_of_order: u64,
    pub evictions: u64,
    pub relays: u64,
    pub requests_sent: u64,
    pub request_hits: u64,
    pub request_misses: u64,
}
