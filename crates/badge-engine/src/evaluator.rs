//! 徽章评估器
//!
//! 纯同步求值：不做 I/O、不持有可变状态，同一输入重复评估结果一致。
//! 判定条件按类型统一 match 分派，输出按目录声明顺序排列。

use crate::catalog::BadgeCatalog;
use crate::criteria::{NameCriterion, StatCriterion};
use crate::input::{AthleteStats, Workout};
use crate::models::BadgeKind;
use badge_shared::observability::metrics;
use tracing::debug;

/// 徽章评估器
#[derive(Debug, Clone, Copy)]
pub struct BadgeEvaluator<'a> {
    catalog: &'a BadgeCatalog,
}

impl Default for BadgeEvaluator<'static> {
    fn default() -> Self {
        Self::new(BadgeCatalog::builtin())
    }
}

impl<'a> BadgeEvaluator<'a> {
    pub fn new(catalog: &'a BadgeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a BadgeCatalog {
        self.catalog
    }

    /// 评估单次训练，返回满足条件的训练类徽章 ID
    ///
    /// 未完成的训练不满足任何赛事徽章；名称缺失按空字符串处理。
    /// 同一训练可同时满足多个徽章，评估器不做跨徽章去重。
    pub fn evaluate_workout(&self, workout: &Workout) -> Vec<String> {
        let lowered = workout.lowered_name();

        let matched: Vec<String> = self
            .catalog
            .iter()
            .filter(|def| match &def.kind {
                BadgeKind::AutomaticWorkout { criterion } => {
                    Self::workout_matches(criterion, &lowered, workout.is_completed)
                }
                _ => false,
            })
            .map(|def| def.id.clone())
            .collect();

        metrics::record_evaluation("workout", matched.len());
        debug!(
            workout_id = ?workout.id,
            completed = workout.is_completed,
            matched = ?matched,
            "Workout evaluated"
        );

        matched
    }

    /// 评估运动员聚合统计，返回满足条件的统计类徽章 ID
    ///
    /// 里程碑各档位独立判定，满足高档位时低档位同样返回。
    pub fn evaluate_stats(&self, stats: &AthleteStats) -> Vec<String> {
        let matched: Vec<String> = self
            .catalog
            .iter()
            .filter(|def| match &def.kind {
                BadgeKind::AutomaticStat { criterion } => Self::stat_matches(criterion, stats),
                _ => false,
            })
            .map(|def| def.id.clone())
            .collect();

        metrics::record_evaluation("stats", matched.len());
        debug!(matched = ?matched, "Athlete stats evaluated");

        matched
    }

    /// 训练名称条件判定
    ///
    /// `lowered_name` 须已转为小写，条件中的子串在目录构建时已统一小写。
    pub fn workout_matches(criterion: &NameCriterion, lowered_name: &str, completed: bool) -> bool {
        completed && criterion.matches(lowered_name)
    }

    /// 统计条件判定
    pub fn stat_matches(criterion: &StatCriterion, stats: &AthleteStats) -> bool {
        match criterion {
            StatCriterion::LiftAtLeast { lift, weight } => stats.lift_or_zero(*lift) >= *weight,
            StatCriterion::TotalAtLeast { lifts, weight } => {
                let total: f64 = lifts.iter().map(|l| stats.lift_or_zero(*l)).sum();
                total >= *weight
            }
            StatCriterion::BodyweightMultiple { lift, multiple } => {
                // 体重未知时为无穷大，条件恒不成立
                stats.lift_or_zero(*lift) >= stats.bodyweight_or_unreachable() * multiple
            }
            StatCriterion::WorkoutsAtLeast { count } => stats.total_workouts_or_zero() >= *count,
        }
    }
}
