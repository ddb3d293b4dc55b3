//! 徽章领域模型

use crate::criteria::{NameCriterion, StatCriterion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 徽章分类
///
/// 声明顺序即展示顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Strength,
    Milestone,
    Endurance,
    Competition,
}

impl BadgeCategory {
    pub const ALL: [BadgeCategory; 4] = [
        BadgeCategory::Strength,
        BadgeCategory::Milestone,
        BadgeCategory::Endurance,
        BadgeCategory::Competition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Milestone => "milestone",
            Self::Endurance => "endurance",
            Self::Competition => "competition",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 徽章类型
///
/// 自动徽章携带且仅携带一个判定条件，手动徽章不携带条件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BadgeKind {
    /// 基于运动员聚合统计判定
    AutomaticStat { criterion: StatCriterion },
    /// 基于单次训练判定
    AutomaticWorkout { criterion: NameCriterion },
    /// 仅由用户手动添加/移除
    Manual,
}

impl BadgeKind {
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }

    pub fn is_automatic(&self) -> bool {
        !self.is_manual()
    }
}

/// 徽章定义（目录条目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    /// 稳定 ID，作为外键持久化在运动员档案中，不可变更
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub category: BadgeCategory,
    pub kind: BadgeKind,
}

impl BadgeDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        emoji: impl Into<String>,
        description: impl Into<String>,
        category: BadgeCategory,
        kind: BadgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            description: description.into(),
            category,
            kind,
        }
    }

    /// 统计类自动徽章
    pub fn stat(
        id: &str,
        name: &str,
        emoji: &str,
        description: &str,
        category: BadgeCategory,
        criterion: StatCriterion,
    ) -> Self {
        Self::new(
            id,
            name,
            emoji,
            description,
            category,
            BadgeKind::AutomaticStat { criterion },
        )
    }

    /// 训练类自动徽章
    pub fn workout(
        id: &str,
        name: &str,
        emoji: &str,
        description: &str,
        category: BadgeCategory,
        criterion: NameCriterion,
    ) -> Self {
        Self::new(
            id,
            name,
            emoji,
            description,
            category,
            BadgeKind::AutomaticWorkout { criterion },
        )
    }

    /// 手动徽章
    pub fn manual(
        id: &str,
        name: &str,
        emoji: &str,
        description: &str,
        category: BadgeCategory,
    ) -> Self {
        Self::new(id, name, emoji, description, category, BadgeKind::Manual)
    }

    pub fn is_manual(&self) -> bool {
        self.kind.is_manual()
    }

    pub fn is_automatic(&self) -> bool {
        self.kind.is_automatic()
    }
}

/// 运动员已获得的徽章
///
/// 由档案存储持有，引擎从不创建或删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub id: String,
    pub earned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl EarnedBadge {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            earned_at: Utc::now(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
