//! 统一可观测性模块
//!
//! 提供日志与指标的统一初始化。所有入口通过单一函数配置，
//! 确保一致的日志格式与指标命名。

pub mod metrics;
pub mod tracing;

use crate::config::ObservabilityConfig;
use crate::error::Result;
use ::tracing::info;

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics 描述信息（仅注册描述，不安装导出器，由宿主进程决定导出方式）
///
/// # Example
///
/// ```ignore
/// use badge_shared::config::AppConfig;
/// use badge_shared::observability;
///
/// fn main() -> anyhow::Result<()> {
///     let config = AppConfig::load("badge-eval")?;
///     observability::init(&config.service_name, &config.observability)?;
///     Ok(())
/// }
/// ```
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;
    metrics::describe_metrics();

    info!(
        service = %service_name,
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Observability initialized"
    );

    Ok(())
}
