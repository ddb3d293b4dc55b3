//! 徽章评估引擎
//!
//! 提供纯函数式的徽章判定能力，支持：
//! - 静态徽章目录（内置或从 JSON/TOML 文件加载）
//! - 单次训练的赛事完赛判定
//! - 运动员聚合统计的力量/里程碑判定
//! - 调用方使用的"已持有过滤"与展示策略
//!
//! 引擎本身不持久化任何数据，所有结果由调用方落库。

pub mod award;
pub mod builtin;
pub mod catalog;
pub mod criteria;
pub mod error;
pub mod evaluator;
pub mod input;
pub mod models;

pub use award::{SurfacePolicy, new_badge_ids};
pub use catalog::BadgeCatalog;
pub use criteria::{Lift, NameCriterion, StatCriterion};
pub use error::{CatalogError, Result};
pub use evaluator::BadgeEvaluator;
pub use input::{AthleteStats, Workout};
pub use models::{BadgeCategory, BadgeDefinition, BadgeKind, EarnedBadge};
