//! 运动员级别的互斥锁
//!
//! 同一运动员的"读取已持有 -> 过滤 -> 写入"必须串行执行，否则并发的两次
//! 评估可能重复发放同一徽章。锁以运动员 ID 为键，不同运动员互不阻塞。
//!
//! ```ignore
//! let locks = AthleteLockManager::new(LockConfig::default());
//! let _guard = locks.acquire("athlete-1").await?;
//! // 临界区
//! ```

use badge_shared::observability::metrics;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument, warn};

use crate::error::{AwardError, Result};

/// 锁配置
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// 等待锁的最长时间
    pub acquire_timeout: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl LockConfig {
    pub fn from_millis(timeout_ms: u64) -> Self {
        Self {
            acquire_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// 运动员锁管理器
#[derive(Debug, Default)]
pub struct AthleteLockManager {
    locks: DashMap<String, Arc<Mutex<()>>>,
    config: LockConfig,
}

/// 锁守卫，drop 时释放
///
/// 释放后若没有其他任务持有或等待同一运动员的锁，则从管理器中移除该条目。
#[derive(Debug)]
pub struct AthleteLockGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    athlete_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl AthleteLockGuard<'_> {
    pub fn athlete_id(&self) -> &str {
        &self.athlete_id
    }
}

impl Drop for AthleteLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // 等待者在分片锁内克隆 Arc，计数为 1 时不会有新的等待者
        self.locks
            .remove_if(&self.athlete_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl AthleteLockManager {
    pub fn new(config: LockConfig) -> Self {
        Self {
            locks: DashMap::new(),
            config,
        }
    }

    /// 获取运动员锁，超时返回 `LockTimeout`
    #[instrument(skip(self))]
    pub async fn acquire(&self, athlete_id: &str) -> Result<AthleteLockGuard<'_>> {
        // 先克隆 Arc 再等待，避免持有 DashMap 分片锁跨 await
        let mutex = self
            .locks
            .entry(athlete_id.to_string())
            .or_default()
            .value()
            .clone();

        let started = Instant::now();
        let guard = tokio::time::timeout(self.config.acquire_timeout, mutex.lock_owned())
            .await
            .map_err(|_| {
                // 持有者可能恰在超时前释放，此时由放弃等待的一方清理条目
                self.locks
                    .remove_if(athlete_id, |_, mutex| Arc::strong_count(mutex) == 1);
                warn!(
                    athlete_id = %athlete_id,
                    timeout_ms = self.config.acquire_timeout.as_millis() as u64,
                    "Athlete lock not acquired"
                );
                AwardError::LockTimeout {
                    athlete_id: athlete_id.to_string(),
                    timeout_ms: self.config.acquire_timeout.as_millis() as u64,
                }
            })?;

        let waited = started.elapsed();
        metrics::record_lock_wait(waited.as_secs_f64());
        debug!(athlete_id = %athlete_id, waited_ms = waited.as_millis() as u64, "Athlete lock acquired");

        Ok(AthleteLockGuard {
            locks: &self.locks,
            athlete_id: athlete_id.to_string(),
            guard: Some(guard),
        })
    }

    /// 当前被持有或等待中的运动员锁数量
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
