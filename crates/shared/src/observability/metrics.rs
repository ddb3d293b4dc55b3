//! 业务指标模块
//!
//! 基于 metrics 门面记录指标。库本身不安装 recorder，
//! 未安装时所有记录调用均为空操作。

/// 徽章评估次数
pub const EVALUATIONS_TOTAL: &str = "badge_evaluations_total";
/// 自动发放的徽章数量
pub const AWARDS_TOTAL: &str = "badge_awards_total";
/// 手动添加/移除的次数
pub const MANUAL_CHANGES_TOTAL: &str = "badge_manual_changes_total";
/// 等待运动员锁的耗时
pub const LOCK_WAIT_SECONDS: &str = "badge_lock_wait_seconds";

/// 注册指标描述
pub fn describe_metrics() {
    metrics::describe_counter!(EVALUATIONS_TOTAL, "Total number of badge evaluations");
    metrics::describe_counter!(AWARDS_TOTAL, "Total number of automatically awarded badges");
    metrics::describe_counter!(
        MANUAL_CHANGES_TOTAL,
        "Total number of manual badge awards and removals"
    );
    metrics::describe_histogram!(
        LOCK_WAIT_SECONDS,
        "Time spent waiting for the per-athlete award lock"
    );
}

/// 记录一次评估
///
/// `source` 为 workout 或 stats。
#[inline]
pub fn record_evaluation(source: &'static str, matched: usize) {
    metrics::counter!(
        EVALUATIONS_TOTAL,
        "source" => source,
        "matched" => if matched > 0 { "true" } else { "false" }
    )
    .increment(1);
}

/// 记录自动发放
#[inline]
pub fn record_award(badge_id: &str, source: &'static str) {
    metrics::counter!(
        AWARDS_TOTAL,
        "badge_id" => badge_id.to_string(),
        "source" => source
    )
    .increment(1);
}

/// 记录手动添加/移除
///
/// `action` 为 award 或 unaward。
#[inline]
pub fn record_manual_change(badge_id: &str, action: &'static str) {
    metrics::counter!(
        MANUAL_CHANGES_TOTAL,
        "badge_id" => badge_id.to_string(),
        "action" => action
    )
    .increment(1);
}

/// 记录锁等待耗时
#[inline]
pub fn record_lock_wait(duration_secs: f64) {
    metrics::histogram!(LOCK_WAIT_SECONDS).record(duration_secs);
}
