//! 徽章发放服务
//!
//! 在纯评估引擎之上编排有状态的发放流程：
//!
//! - **评估**: 调用 `badge-engine` 得到满足条件的徽章
//! - **去重**: 过滤运动员已持有的徽章，同一运动员的发放串行执行
//! - **持久化**: 通过 `ProfileStore` 写入所有新徽章
//! - **展示**: 按 `SurfacePolicy` 挑选本次需要展示的徽章

pub mod awarder;
pub mod error;
pub mod lock;
pub mod store;

pub use awarder::{AwardOutcome, BadgeAwarder, HeldBadge};
pub use error::{AwardError, Result};
pub use lock::{AthleteLockManager, LockConfig};
pub use store::{InMemoryProfileStore, ProfileStore};
