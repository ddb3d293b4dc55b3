//! 评估输入
//!
//! 训练记录与运动员聚合统计均来自外部协作方，字段缺失或格式异常时
//! 一律降级为安全默认值（空名称、0、不可达哨兵值），绝不报错。
//! 只有顶层不是 JSON 对象时 `from_json` 才返回错误。

use crate::criteria::Lift;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 体重未知时使用的哨兵值，任何体重倍数类条件都不可能满足
pub const UNREACHABLE_BODYWEIGHT: f64 = f64::INFINITY;

/// 运动员聚合统计
///
/// 反序列化时同一字段的 camelCase 与 snake_case 写法可同时出现，
/// 以 camelCase 为准，值无效时回退到另一写法。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AthleteStats {
    #[serde(rename = "squat1RM")]
    pub squat_1rm: Option<f64>,
    #[serde(rename = "bench1RM")]
    pub bench_1rm: Option<f64>,
    #[serde(rename = "deadlift1RM")]
    pub deadlift_1rm: Option<f64>,
    #[serde(rename = "ohp1RM")]
    pub ohp_1rm: Option<f64>,
    pub bodyweight: Option<f64>,
    #[serde(rename = "totalWorkouts")]
    pub total_workouts: Option<u32>,
}

impl From<Map<String, Value>> for AthleteStats {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            squat_1rm: first_valid(&map, &["squat1RM", "squat_1rm"], as_finite_f64),
            bench_1rm: first_valid(&map, &["bench1RM", "bench_1rm"], as_finite_f64),
            deadlift_1rm: first_valid(&map, &["deadlift1RM", "deadlift_1rm"], as_finite_f64),
            ohp_1rm: first_valid(&map, &["ohp1RM", "ohp_1rm"], as_finite_f64),
            bodyweight: first_valid(&map, &["bodyweight"], as_finite_f64),
            total_workouts: first_valid(&map, &["totalWorkouts", "total_workouts"], as_count),
        }
    }
}

impl AthleteStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象创建
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_lift(mut self, lift: Lift, weight: f64) -> Self {
        *self.slot_mut(lift) = Some(weight);
        self
    }

    pub fn with_bodyweight(mut self, bodyweight: f64) -> Self {
        self.bodyweight = Some(bodyweight);
        self
    }

    pub fn with_total_workouts(mut self, count: u32) -> Self {
        self.total_workouts = Some(count);
        self
    }

    /// 获取原始 1RM 值
    pub fn one_rep_max(&self, lift: Lift) -> Option<f64> {
        match lift {
            Lift::Squat => self.squat_1rm,
            Lift::Bench => self.bench_1rm,
            Lift::Deadlift => self.deadlift_1rm,
            Lift::OverheadPress => self.ohp_1rm,
        }
    }

    /// 获取 1RM，缺失或非法（负数、NaN、无穷）时按 0 计
    pub fn lift_or_zero(&self, lift: Lift) -> f64 {
        self.one_rep_max(lift)
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(0.0)
    }

    /// 获取有效体重，缺失或非正数时返回 None
    pub fn known_bodyweight(&self) -> Option<f64> {
        self.bodyweight.filter(|w| w.is_finite() && *w > 0.0)
    }

    /// 获取体重，未知时返回不可达哨兵值
    pub fn bodyweight_or_unreachable(&self) -> f64 {
        self.known_bodyweight().unwrap_or(UNREACHABLE_BODYWEIGHT)
    }

    pub fn total_workouts_or_zero(&self) -> u32 {
        self.total_workouts.unwrap_or(0)
    }

    fn slot_mut(&mut self, lift: Lift) -> &mut Option<f64> {
        match lift {
            Lift::Squat => &mut self.squat_1rm,
            Lift::Bench => &mut self.bench_1rm,
            Lift::Deadlift => &mut self.deadlift_1rm,
            Lift::OverheadPress => &mut self.ohp_1rm,
        }
    }
}

/// 训练记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Workout {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl From<Map<String, Value>> for Workout {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            id: first_valid(&map, &["id"], as_text),
            name: first_valid(&map, &["name"], as_text),
            is_completed: first_valid(&map, &["isCompleted", "is_completed"], Value::as_bool)
                .unwrap_or(false),
        }
    }
}

impl Workout {
    pub fn new(name: impl Into<String>, is_completed: bool) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            is_completed,
        }
    }

    /// 从 JSON 对象创建
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// 小写名称，缺失时为空字符串
    pub fn lowered_name(&self) -> String {
        self.name.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// 按顺序尝试多个键，返回第一个可解析的值，其余情况一律视为缺失
fn first_valid<T>(
    map: &Map<String, Value>,
    keys: &[&str],
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    keys.iter().filter_map(|k| map.get(*k)).find_map(parse)
}

/// 接受数字或数字字符串
fn as_finite_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    v.filter(|v| v.is_finite())
}

fn as_count(value: &Value) -> Option<u32> {
    as_finite_f64(value)
        .filter(|v| *v >= 0.0)
        .map(|v| v.floor().min(u32::MAX as f64) as u32)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
