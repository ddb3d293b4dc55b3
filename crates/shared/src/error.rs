//! 统一错误处理模块
//!
//! 定义基础设施层共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum BadgeError {
    // ==================== 配置错误 ====================
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 可观测性错误 ====================
    #[error("日志初始化失败: {0}")]
    Observability(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, BadgeError>;

impl BadgeError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Observability(_) => "OBSERVABILITY_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = BadgeError::Observability("subscriber already set".to_string());
        assert_eq!(err.code(), "OBSERVABILITY_ERROR");
        assert!(err.to_string().contains("subscriber already set"));
    }

    #[test]
    fn test_from_config_error() {
        let err: BadgeError = config::ConfigError::NotFound("engine".to_string()).into();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
