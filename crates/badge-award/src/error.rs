//! 徽章发放错误类型

use thiserror::Error;

/// 徽章发放错误类型
#[derive(Debug, Error)]
pub enum AwardError {
    // === 徽章相关错误 ===
    #[error("徽章不存在: {0}")]
    UnknownBadge(String),

    #[error("徽章不支持手动发放: {0}")]
    NotManual(String),

    // === 并发控制 ===
    #[error("获取运动员锁超时: athlete_id={athlete_id}, timeout_ms={timeout_ms}")]
    LockTimeout { athlete_id: String, timeout_ms: u64 },

    // === 配置错误 ===
    #[error("无效的展示策略: {0}")]
    InvalidPolicy(String),

    #[error("目录加载失败: {0}")]
    Catalog(#[from] badge_engine::CatalogError),

    // === 系统错误 ===
    #[error("存储错误: {0}")]
    Store(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, AwardError>;

impl AwardError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownBadge(_) => "UNKNOWN_BADGE",
            Self::NotManual(_) => "NOT_MANUAL",
            Self::LockTimeout { .. } => "LOCK_TIMEOUT",
            Self::InvalidPolicy(_) => "INVALID_POLICY",
            Self::Catalog(_) => "CATALOG_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// 是否可重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout { .. } | Self::Store(_))
    }
}
