//! 错误类型
//!
//! 配置错误在任何事件被调度之前返回给调用方。

use thiserror::Error;

/// 仿真配置错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("fan-out {fanout} is not satisfiable with {clients} clients (need fanout < clients)")]
    FanoutUnsatisfiable { fanout: usize, clients: usize },
    #[error("bandwidth bounds must satisfy 0 < min <= max, got [{min}, {max}] KB/s")]
    InvalidBandwidthBounds { min: f64, max: f64 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("horizon must be finite and non-negative, got {0} s")]
    InvalidHorizon(f64),
    #[error("failed to read config {path}: {reason}")]
    Load { path: String, reason: String },
}
