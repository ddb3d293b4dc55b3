//! 测试数据 Fixtures

use std::sync::Arc;

use badge_award::{BadgeAwarder, InMemoryProfileStore, ProfileStore};
use badge_engine::{AthleteStats, Lift, Workout};
use badge_shared::config::AppConfig;

/// 测试环境：发放器与其底层存储
pub struct TestEnvironment {
    pub store: Arc<InMemoryProfileStore>,
    pub awarder: Arc<BadgeAwarder>,
}

impl TestEnvironment {
    /// 按默认配置创建（内置目录，first_new 策略）
    pub fn new() -> Self {
        Self::with_policy("first_new")
    }

    pub fn with_policy(policy: &str) -> Self {
        let mut config = AppConfig::default();
        config.award.surface_policy = policy.to_string();

        let store = Arc::new(InMemoryProfileStore::new());
        let awarder = BadgeAwarder::from_config(&config, store.clone()).unwrap();

        Self {
            store,
            awarder: Arc::new(awarder),
        }
    }

    pub async fn held_ids(&self, athlete_id: &str) -> Vec<String> {
        self.store
            .list_badges(athlete_id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect()
    }
}

/// 一名运动员一个赛季的训练记录
pub fn race_season() -> Vec<Workout> {
    vec![
        Workout::new("Morning parkrun", true).with_id("w-1"),
        Workout::new("Tempo run", true).with_id("w-2"),
        Workout::new("Cherry Blossom 10K", true).with_id("w-3"),
        Workout::new("Marathon pace long run", false).with_id("w-4"),
        Workout::new("Philadelphia Half Marathon", true).with_id("w-5"),
        Workout::new("Philadelphia Marathon", true).with_id("w-6"),
    ]
}

/// 力量训练者逐步增长的统计快照
pub fn strength_progression() -> Vec<AthleteStats> {
    vec![
        AthleteStats::new()
            .with_lift(Lift::Squat, 225.0)
            .with_lift(Lift::Bench, 185.0)
            .with_lift(Lift::Deadlift, 315.0)
            .with_bodyweight(180.0)
            .with_total_workouts(1),
        AthleteStats::new()
            .with_lift(Lift::Squat, 315.0)
            .with_lift(Lift::Bench, 225.0)
            .with_lift(Lift::Deadlift, 460.0)
            .with_bodyweight(182.0)
            .with_total_workouts(48),
        AthleteStats::new()
            .with_lift(Lift::Squat, 365.0)
            .with_lift(Lift::Bench, 245.0)
            .with_lift(Lift::Deadlift, 455.0)
            .with_bodyweight(181.0)
            .with_total_workouts(103),
    ]
}
