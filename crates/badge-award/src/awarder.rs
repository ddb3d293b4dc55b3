//! 徽章发放编排
//!
//! 评估引擎只回答"满足了哪些徽章"，发放器负责剩下的步骤：
//! 加锁、读取已持有、过滤、持久化全部新徽章、按策略挑选展示。
//! 手动徽章只能通过 `award_manual` / `unaward_manual` 变更。

use badge_engine::{
    new_badge_ids, AthleteStats, BadgeCatalog, BadgeDefinition, BadgeEvaluator, EarnedBadge,
    SurfacePolicy, Workout,
};
use badge_shared::config::AppConfig;
use badge_shared::observability::metrics;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{AwardError, Result};
use crate::lock::{AthleteLockManager, LockConfig};
use crate::store::ProfileStore;

/// 一次自动发放的结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AwardOutcome {
    /// 本次新写入的徽章（按目录顺序）
    pub awarded: Vec<EarnedBadge>,
    /// 需要向用户展示的徽章 ID
    pub surfaced: Vec<String>,
}

impl AwardOutcome {
    pub fn is_empty(&self) -> bool {
        self.awarded.is_empty()
    }

    pub fn awarded_ids(&self) -> Vec<&str> {
        self.awarded.iter().map(|b| b.id.as_str()).collect()
    }
}

/// 已持有徽章与其定义
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeldBadge {
    pub definition: BadgeDefinition,
    pub earned: EarnedBadge,
}

/// 徽章发放器
pub struct BadgeAwarder {
    catalog: Arc<BadgeCatalog>,
    store: Arc<dyn ProfileStore>,
    locks: AthleteLockManager,
    policy: SurfacePolicy,
}

impl BadgeAwarder {
    pub fn new(
        catalog: Arc<BadgeCatalog>,
        store: Arc<dyn ProfileStore>,
        policy: SurfacePolicy,
        lock_config: LockConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            locks: AthleteLockManager::new(lock_config),
            policy,
        }
    }

    /// 使用内置目录和默认策略创建
    pub fn with_builtin(store: Arc<dyn ProfileStore>) -> Self {
        Self::new(
            Arc::new(BadgeCatalog::builtin().clone()),
            store,
            SurfacePolicy::default(),
            LockConfig::default(),
        )
    }

    /// 根据应用配置创建
    ///
    /// `engine.catalog_path` 为空时使用内置目录；展示策略无法识别时返回错误。
    pub fn from_config(config: &AppConfig, store: Arc<dyn ProfileStore>) -> Result<Self> {
        let policy = SurfacePolicy::parse(&config.award.surface_policy)
            .ok_or_else(|| AwardError::InvalidPolicy(config.award.surface_policy.clone()))?;

        let catalog = match config.engine.catalog_path() {
            Some(path) => BadgeCatalog::from_file(&path)?,
            None => BadgeCatalog::builtin().clone(),
        };

        info!(
            badges = catalog.len(),
            policy = %policy,
            lock_timeout_ms = config.award.lock_timeout_ms,
            "Badge awarder configured"
        );

        Ok(Self::new(
            Arc::new(catalog),
            store,
            policy,
            LockConfig::from_millis(config.award.lock_timeout_ms),
        ))
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> SurfacePolicy {
        self.policy
    }

    fn evaluator(&self) -> BadgeEvaluator<'_> {
        BadgeEvaluator::new(&self.catalog)
    }

    /// 训练完成后发放赛事徽章
    ///
    /// 徽章元数据记录触发的训练 ID 与名称。
    #[instrument(skip(self, workout), fields(athlete_id = %athlete_id, workout_id = ?workout.id))]
    pub async fn on_workout_completed(
        &self,
        athlete_id: &str,
        workout: &Workout,
    ) -> Result<AwardOutcome> {
        let evaluated = self.evaluator().evaluate_workout(workout);
        if evaluated.is_empty() {
            return Ok(AwardOutcome::default());
        }

        let mut metadata = Map::new();
        if let Some(id) = &workout.id {
            metadata.insert("workout_id".to_string(), json!(id));
        }
        metadata.insert(
            "workout_name".to_string(),
            json!(workout.name.clone().unwrap_or_default()),
        );

        self.award_evaluated(athlete_id, &evaluated, Some(Value::Object(metadata)), "workout")
            .await
    }

    /// 统计重算后发放力量/里程碑徽章
    #[instrument(skip(self, stats), fields(athlete_id = %athlete_id))]
    pub async fn on_stats_recomputed(
        &self,
        athlete_id: &str,
        stats: &AthleteStats,
    ) -> Result<AwardOutcome> {
        let evaluated = self.evaluator().evaluate_stats(stats);
        if evaluated.is_empty() {
            return Ok(AwardOutcome::default());
        }

        self.award_evaluated(athlete_id, &evaluated, None, "stats")
            .await
    }

    async fn award_evaluated(
        &self,
        athlete_id: &str,
        evaluated: &[String],
        metadata: Option<Value>,
        source: &'static str,
    ) -> Result<AwardOutcome> {
        let _guard = self.locks.acquire(athlete_id).await?;

        let held = self.store.list_badges(athlete_id).await?;
        let new_ids = new_badge_ids(evaluated, &held);
        if new_ids.is_empty() {
            debug!(athlete_id = %athlete_id, evaluated = ?evaluated, "All evaluated badges already held");
            return Ok(AwardOutcome::default());
        }

        let badges = new_ids
            .iter()
            .map(|id| {
                let badge = EarnedBadge::new(id.clone());
                match &metadata {
                    Some(m) => badge.with_metadata(m.clone()),
                    None => badge,
                }
            })
            .collect();

        let awarded = self.store.add_badges(athlete_id, badges).await?;
        for badge in &awarded {
            metrics::record_award(&badge.id, source);
        }

        let awarded_ids: Vec<String> = awarded.iter().map(|b| b.id.clone()).collect();
        let surfaced = self.policy.select(&awarded_ids);

        info!(
            athlete_id = %athlete_id,
            source = source,
            awarded = ?awarded_ids,
            surfaced = ?surfaced,
            "Badges awarded"
        );

        Ok(AwardOutcome { awarded, surfaced })
    }

    /// 手动添加徽章
    ///
    /// 只接受手动徽章；已持有时返回 `None`。
    #[instrument(skip(self))]
    pub async fn award_manual(
        &self,
        athlete_id: &str,
        badge_id: &str,
    ) -> Result<Option<EarnedBadge>> {
        self.require_manual(badge_id)?;
        let _guard = self.locks.acquire(athlete_id).await?;

        let added = self
            .store
            .add_badges(athlete_id, vec![EarnedBadge::new(badge_id)])
            .await?
            .into_iter()
            .next();

        match &added {
            Some(_) => {
                metrics::record_manual_change(badge_id, "award");
                info!(athlete_id = %athlete_id, badge_id = %badge_id, "Manual badge awarded");
            }
            None => debug!(athlete_id = %athlete_id, badge_id = %badge_id, "Manual badge already held"),
        }

        Ok(added)
    }

    /// 手动移除徽章，返回是否确实移除
    #[instrument(skip(self))]
    pub async fn unaward_manual(&self, athlete_id: &str, badge_id: &str) -> Result<bool> {
        self.require_manual(badge_id)?;
        let _guard = self.locks.acquire(athlete_id).await?;

        let removed = self.store.remove_badge(athlete_id, badge_id).await?;
        if removed {
            metrics::record_manual_change(badge_id, "unaward");
            info!(athlete_id = %athlete_id, badge_id = %badge_id, "Manual badge removed");
        }

        Ok(removed)
    }

    /// 列出运动员持有的徽章及其定义
    ///
    /// 目录中已不存在的 ID 会被跳过。
    #[instrument(skip(self))]
    pub async fn held_badges(&self, athlete_id: &str) -> Result<Vec<HeldBadge>> {
        let held = self.store.list_badges(athlete_id).await?;

        Ok(held
            .into_iter()
            .filter_map(|earned| match self.catalog.lookup(&earned.id) {
                Some(definition) => Some(HeldBadge {
                    definition: definition.clone(),
                    earned,
                }),
                None => {
                    debug!(athlete_id = %athlete_id, badge_id = %earned.id, "Held badge not in catalog, skipped");
                    None
                }
            })
            .collect())
    }

    fn require_manual(&self, badge_id: &str) -> Result<&BadgeDefinition> {
        let definition = self
            .catalog
            .lookup(badge_id)
            .ok_or_else(|| AwardError::UnknownBadge(badge_id.to_string()))?;

        if !definition.is_manual() {
            return Err(AwardError::NotManual(badge_id.to_string()));
        }

        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryProfileStore, MockProfileStore};
    use badge_engine::Lift;

    fn awarder(policy: SurfacePolicy) -> BadgeAwarder {
        BadgeAwarder::new(
            Arc::new(BadgeCatalog::builtin().clone()),
            Arc::new(InMemoryProfileStore::new()),
            policy,
            LockConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_workout_awards_all_surfaces_first() {
        let awarder = awarder(SurfacePolicy::FirstNew);
        let workout = Workout::new("Ironman Triathlon Kona", true).with_id("w-1");

        let outcome = awarder.on_workout_completed("a1", &workout).await.unwrap();

        assert_eq!(outcome.awarded_ids(), vec!["triathlon_finisher", "ironman_finisher"]);
        assert_eq!(outcome.surfaced, vec!["triathlon_finisher"]);

        let metadata = outcome.awarded[0].metadata.as_ref().unwrap();
        assert_eq!(metadata["workout_id"], "w-1");
        assert_eq!(metadata["workout_name"], "Ironman Triathlon Kona");
    }

    #[tokio::test]
    async fn test_surface_all_policy() {
        let awarder = awarder(SurfacePolicy::All);
        let stats = AthleteStats::new().with_total_workouts(10);

        let outcome = awarder.on_stats_recomputed("a1", &stats).await.unwrap();
        assert_eq!(outcome.surfaced, vec!["first_workout", "10_workouts"]);
        assert!(outcome.awarded.iter().all(|b| b.metadata.is_none()));
    }

    #[tokio::test]
    async fn test_held_badges_are_not_reawarded() {
        let awarder = awarder(SurfacePolicy::FirstNew);
        let stats = AthleteStats::new().with_lift(Lift::Bench, 225.0);

        let first = awarder.on_stats_recomputed("a1", &stats).await.unwrap();
        assert_eq!(first.awarded_ids(), vec!["two_plate_bench"]);

        let second = awarder.on_stats_recomputed("a1", &stats).await.unwrap();
        assert!(second.is_empty());
        assert!(second.surfaced.is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_workout_skips_store() {
        let mut store = MockProfileStore::new();
        store.expect_list_badges().never();
        store.expect_add_badges().never();

        let awarder = BadgeAwarder::with_builtin(Arc::new(store));
        let outcome = awarder
            .on_workout_completed("a1", &Workout::new("Chicago Marathon", false))
            .await
            .unwrap();

        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let mut store = MockProfileStore::new();
        store
            .expect_list_badges()
            .returning(|_| Err(AwardError::Store("connection reset".to_string())));

        let awarder = BadgeAwarder::with_builtin(Arc::new(store));
        let err = awarder
            .on_workout_completed("a1", &Workout::new("parkrun", true))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "STORE_ERROR");
    }

    #[tokio::test]
    async fn test_award_manual_is_idempotent() {
        let awarder = awarder(SurfacePolicy::FirstNew);

        let first = awarder.award_manual("a1", "meet_day").await.unwrap();
        assert_eq!(first.map(|b| b.id), Some("meet_day".to_string()));

        assert!(awarder.award_manual("a1", "meet_day").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_award_manual_rejects_automatic_and_unknown() {
        let awarder = awarder(SurfacePolicy::FirstNew);

        let err = awarder.award_manual("a1", "marathon_finisher").await.unwrap_err();
        assert_eq!(err.code(), "NOT_MANUAL");

        let err = awarder.award_manual("a1", "moon_landing").await.unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_BADGE");

        let err = awarder.unaward_manual("a1", "1000lb_club").await.unwrap_err();
        assert_eq!(err.code(), "NOT_MANUAL");
    }

    #[tokio::test]
    async fn test_unaward_manual() {
        let awarder = awarder(SurfacePolicy::FirstNew);
        awarder.award_manual("a1", "century_ride").await.unwrap();

        assert!(awarder.unaward_manual("a1", "century_ride").await.unwrap());
        assert!(!awarder.unaward_manual("a1", "century_ride").await.unwrap());
    }

    #[tokio::test]
    async fn test_held_badges_skip_unknown_ids() {
        let store = Arc::new(InMemoryProfileStore::new());
        store
            .add_badges(
                "a1",
                vec![EarnedBadge::new("retired_badge"), EarnedBadge::new("podium_finish")],
            )
            .await
            .unwrap();

        let awarder = BadgeAwarder::with_builtin(store);
        let held = awarder.held_badges("a1").await.unwrap();

        assert_eq!(held.len(), 1);
        assert_eq!(held[0].definition.id, "podium_finish");
        assert_eq!(held[0].earned.id, "podium_finish");
    }

    #[tokio::test]
    async fn test_from_config_rejects_unknown_policy() {
        let mut config = AppConfig::default();
        config.award.surface_policy = "newest".to_string();

        let result = BadgeAwarder::from_config(&config, Arc::new(InMemoryProfileStore::new()));
        assert!(matches!(result, Err(AwardError::InvalidPolicy(_))));
    }

    #[tokio::test]
    async fn test_from_config_defaults() {
        let awarder =
            BadgeAwarder::from_config(&AppConfig::default(), Arc::new(InMemoryProfileStore::new()))
                .unwrap();

        assert_eq!(awarder.policy(), SurfacePolicy::FirstNew);
        assert_eq!(awarder.catalog().len(), BadgeCatalog::builtin().len());
    }

    #[tokio::test]
    async fn test_lock_timeout_propagates_without_writing() {
        let store = Arc::new(InMemoryProfileStore::new());
        let awarder = BadgeAwarder::new(
            Arc::new(BadgeCatalog::builtin().clone()),
            store.clone(),
            SurfacePolicy::All,
            LockConfig::from_millis(20),
        );

        let held = awarder.locks.acquire("a1").await.unwrap();

        let stats = AthleteStats::new().with_total_workouts(10);
        let err = awarder.on_stats_recomputed("a1", &stats).await.unwrap_err();
        assert_eq!(err.code(), "LOCK_TIMEOUT");

        let err = awarder.award_manual("a1", "meet_day").await.unwrap_err();
        assert_eq!(err.code(), "LOCK_TIMEOUT");
        assert!(store.list_badges("a1").await.unwrap().is_empty());

        drop(held);
        let outcome = awarder.on_stats_recomputed("a1", &stats).await.unwrap();
        assert_eq!(outcome.awarded_ids(), vec!["first_workout", "10_workouts"]);
    }

    #[tokio::test]
    async fn test_lock_entries_released_after_operations() {
        let awarder = awarder(SurfacePolicy::FirstNew);

        for i in 0..100 {
            let athlete_id = format!("athlete-{}", i);
            awarder.award_manual(&athlete_id, "meet_day").await.unwrap();
            awarder.unaward_manual(&athlete_id, "meet_day").await.unwrap();
            awarder
                .on_workout_completed(&athlete_id, &Workout::new("parkrun", true))
                .await
                .unwrap();
        }

        assert!(awarder.locks.is_empty());
    }
}
