//! 可视化数据导出（供外部拓扑/结果查看工具使用）
//!
//! 设计目标：
//! - **结构化**：用 JSON 而不是解析文本日志
//! - **只读**：外部工具只消费拓扑（位置、链路）与指标报告

mod types;

pub use types::{VizLinkInfo, VizNodeInfo, VizNodeKind, VizReport, VizTopology};
