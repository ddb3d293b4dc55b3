//! 判定条件定义
//!
//! 自动徽章的判定条件以数据形式描述（而非闭包），
//! 以便目录可以序列化，并由评估器统一 match 分派。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 力量项目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
    OverheadPress,
}

impl Lift {
    /// 三大项（深蹲、卧推、硬拉），用于总和类徽章
    pub const BIG_THREE: [Lift; 3] = [Lift::Squat, Lift::Bench, Lift::Deadlift];
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Squat => "squat",
            Self::Bench => "bench",
            Self::Deadlift => "deadlift",
            Self::OverheadPress => "overhead_press",
        };
        write!(f, "{}", s)
    }
}

/// 统计类判定条件
///
/// 所有阈值比较均为闭区间（`>=`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatCriterion {
    /// 单项 1RM 达到指定重量
    LiftAtLeast { lift: Lift, weight: f64 },
    /// 多项 1RM 之和达到指定重量，缺失项按 0 计
    TotalAtLeast { lifts: Vec<Lift>, weight: f64 },
    /// 单项 1RM 达到体重的指定倍数，体重未知时永不满足
    BodyweightMultiple { lift: Lift, multiple: f64 },
    /// 累计完成训练次数达到指定值
    WorkoutsAtLeast { count: u32 },
}

impl StatCriterion {
    /// 三大项总和条件
    pub fn big_three_total(weight: f64) -> Self {
        Self::TotalAtLeast {
            lifts: Lift::BIG_THREE.to_vec(),
            weight,
        }
    }

    /// 校验条件参数
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::LiftAtLeast { weight, .. } => positive("weight", *weight),
            Self::TotalAtLeast { lifts, weight } => {
                if lifts.is_empty() {
                    return Err("lifts must not be empty".to_string());
                }
                positive("weight", *weight)
            }
            Self::BodyweightMultiple { multiple, .. } => positive("multiple", *multiple),
            Self::WorkoutsAtLeast { count } => {
                if *count == 0 {
                    Err("count must be at least 1".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn positive(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a positive finite number, got {}", field, value))
    }
}

impl fmt::Display for StatCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiftAtLeast { lift, weight } => write!(f, "{} >= {}", lift, weight),
            Self::TotalAtLeast { lifts, weight } => {
                let names: Vec<String> = lifts.iter().map(|l| l.to_string()).collect();
                write!(f, "{} >= {}", names.join(" + "), weight)
            }
            Self::BodyweightMultiple { lift, multiple } => {
                write!(f, "{} >= {} x bodyweight", lift, multiple)
            }
            Self::WorkoutsAtLeast { count } => write!(f, "total_workouts >= {}", count),
        }
    }
}

/// 训练名称判定条件
///
/// 仅对已完成的训练生效。名称统一转为小写后匹配：
/// 必须包含全部 `all_of`，至少包含一个 `any_of`（为空时不检查），
/// 且不能包含任何 `none_of`。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NameCriterion {
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
    #[serde(default)]
    pub none_of: Vec<String>,
}

impl NameCriterion {
    /// 名称需包含全部给定子串
    pub fn contains_all<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all_of: terms.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 名称需包含任意一个给定子串
    pub fn contains_any<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            any_of: terms.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 追加排除子串
    pub fn excluding<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.none_of.extend(terms.into_iter().map(Into::into));
        self
    }

    /// 将所有子串转为小写
    pub fn normalized(self) -> Self {
        let lower =
            |v: Vec<String>| -> Vec<String> { v.into_iter().map(|s| s.to_lowercase()).collect() };
        Self {
            all_of: lower(self.all_of),
            any_of: lower(self.any_of),
            none_of: lower(self.none_of),
        }
    }

    /// 对已小写的名称进行匹配
    pub fn matches(&self, lowered_name: &str) -> bool {
        self.all_of.iter().all(|t| lowered_name.contains(t.as_str()))
            && (self.any_of.is_empty()
                || self.any_of.iter().any(|t| lowered_name.contains(t.as_str())))
            && !self.none_of.iter().any(|t| lowered_name.contains(t.as_str()))
    }

    /// 校验条件参数
    pub fn validate(&self) -> Result<(), String> {
        if self.all_of.is_empty() && self.any_of.is_empty() {
            return Err("all_of and any_of must not both be empty".to_string());
        }

        let has_blank = self
            .all_of
            .iter()
            .chain(&self.any_of)
            .chain(&self.none_of)
            .any(|t| t.trim().is_empty());
        if has_blank {
            return Err("terms must not be blank".to_string());
        }

        Ok(())
    }
}

impl fmt::Display for NameCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "completed")?;
        if !self.all_of.is_empty() {
            write!(f, " AND name has all {:?}", self.all_of)?;
        }
        if !self.any_of.is_empty() {
            write!(f, " AND name has any {:?}", self.any_of)?;
        }
        if !self.none_of.is_empty() {
            write!(f, " AND name has none {:?}", self.none_of)?;
        }
        Ok(())
    }
}
