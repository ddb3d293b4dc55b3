//! 共享库
//!
//! 包含徽章引擎与发放编排共用的配置、错误处理、日志与指标等基础设施代码。

pub mod config;
pub mod error;
pub mod observability;
