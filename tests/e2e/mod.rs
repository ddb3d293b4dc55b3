//! 徽章系统端到端测试
//!
//! 测试覆盖完整的业务流程，包括：
//! - 训练完成触发赛事徽章
//! - 统计重算触发力量/里程碑徽章
//! - 手动徽章的添加与移除
//! - 多名运动员并发发放

pub mod fixtures;
pub mod suites;
