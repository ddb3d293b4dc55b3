//! 调用方发放辅助
//!
//! 引擎不提供有状态的发放操作。这里只包含两个纯函数式步骤：
//! 过滤运动员已持有的徽章，以及按产品策略挑选需要展示的徽章。

use crate::models::EarnedBadge;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 过滤已持有的徽章，保持评估输出顺序
pub fn new_badge_ids(evaluated: &[String], held: &[EarnedBadge]) -> Vec<String> {
    let held: HashSet<&str> = held.iter().map(|b| b.id.as_str()).collect();
    let mut seen = HashSet::new();

    evaluated
        .iter()
        .filter(|id| !held.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// 新徽章的展示策略
///
/// 这是产品策略而非引擎保证：所有新徽章都会被持久化，
/// 策略只决定一次交互中向用户展示哪些。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfacePolicy {
    /// 只展示目录顺序中第一个新徽章
    #[default]
    FirstNew,
    /// 展示全部新徽章
    All,
}

impl SurfacePolicy {
    /// 从配置字符串解析，不区分大小写
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_new" | "first-new" => Some(Self::FirstNew),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn select(&self, new_ids: &[String]) -> Vec<String> {
        match self {
            Self::FirstNew => new_ids.iter().take(1).cloned().collect(),
            Self::All => new_ids.to_vec(),
        }
    }
}

impl fmt::Display for SurfacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstNew => write!(f, "first_new"),
            Self::All => write!(f, "all"),
        }
    }
}
