//! 徽章目录错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("徽章 ID 重复: {0}")]
    DuplicateId(String),

    #[error("徽章 ID 不能为空 (位置 {index})")]
    EmptyId { index: usize },

    #[error("无效的判定条件: badge_id={badge_id}, {reason}")]
    InvalidCriterion { badge_id: String, reason: String },

    #[error("目录文件加载失败: {0}")]
    Load(#[from] config::ConfigError),

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CatalogError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "DUPLICATE_BADGE_ID",
            Self::EmptyId { .. } => "EMPTY_BADGE_ID",
            Self::InvalidCriterion { .. } => "INVALID_CRITERION",
            Self::Load(_) => "CATALOG_LOAD_FAILED",
            Self::JsonError(_) => "JSON_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
