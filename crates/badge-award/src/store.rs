//! 运动员档案存储
//!
//! 定义徽章持有记录的存储接口，以及基于 DashMap 的内存实现。
//! 存储层只负责持久化，不包含评估逻辑。

use async_trait::async_trait;
use badge_engine::EarnedBadge;
use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;

/// 运动员档案存储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// 列出运动员持有的徽章，按获得顺序排列
    async fn list_badges(&self, athlete_id: &str) -> Result<Vec<EarnedBadge>>;

    /// 追加徽章，已持有的 ID 被忽略，返回实际写入的记录
    async fn add_badges(&self, athlete_id: &str, badges: Vec<EarnedBadge>)
    -> Result<Vec<EarnedBadge>>;

    /// 移除徽章，返回是否确实移除
    async fn remove_badge(&self, athlete_id: &str, badge_id: &str) -> Result<bool>;
}

/// 内存档案存储
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: DashMap<String, Vec<EarnedBadge>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 有档案的运动员数量
    pub fn athlete_count(&self) -> usize {
        self.profiles.len()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn list_badges(&self, athlete_id: &str) -> Result<Vec<EarnedBadge>> {
        Ok(self
            .profiles
            .get(athlete_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn add_badges(
        &self,
        athlete_id: &str,
        badges: Vec<EarnedBadge>,
    ) -> Result<Vec<EarnedBadge>> {
        let mut entry = self.profiles.entry(athlete_id.to_string()).or_default();
        let mut added = Vec::with_capacity(badges.len());

        for badge in badges {
            if entry.iter().any(|held| held.id == badge.id) {
                debug!(athlete_id = %athlete_id, badge_id = %badge.id, "Badge already held, skipped");
                continue;
            }
            entry.push(badge.clone());
            added.push(badge);
        }

        Ok(added)
    }

    async fn remove_badge(&self, athlete_id: &str, badge_id: &str) -> Result<bool> {
        let Some(mut entry) = self.profiles.get_mut(athlete_id) else {
            return Ok(false);
        };

        let before = entry.len();
        entry.retain(|held| held.id != badge_id);
        Ok(entry.len() < before)
    }
}
