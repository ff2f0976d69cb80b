//! 拓扑构建

pub mod random_overlay;
