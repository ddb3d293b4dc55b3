//! 内置徽章目录
//!
//! 徽章 ID 一经发布永不变更，已作为外键保存在运动员档案中。
//! 声明顺序即评估输出顺序与展示顺序。

use crate::criteria::{Lift, NameCriterion, StatCriterion};
use crate::models::{BadgeCategory, BadgeDefinition};

// ==================== 力量 ====================
pub const THOUSAND_LB_CLUB: &str = "1000lb_club";
pub const FIFTEEN_HUNDRED_LB_CLUB: &str = "1500lb_club";
pub const BODYWEIGHT_BENCH: &str = "bodyweight_bench";
pub const DOUBLE_BODYWEIGHT_SQUAT: &str = "double_bodyweight_squat";
pub const BODYWEIGHT_OHP: &str = "bodyweight_ohp";
pub const TWO_PLATE_BENCH: &str = "two_plate_bench";
pub const THREE_PLATE_SQUAT: &str = "three_plate_squat";
pub const FOUR_PLATE_DEADLIFT: &str = "four_plate_deadlift";

// ==================== 里程碑 ====================
pub const FIRST_WORKOUT: &str = "first_workout";
pub const WORKOUTS_10: &str = "10_workouts";
pub const WORKOUTS_50: &str = "50_workouts";
pub const WORKOUTS_100: &str = "100_workouts";
pub const WORKOUTS_365: &str = "365_workouts";

// ==================== 耐力 ====================
pub const FIVE_K_FINISHER: &str = "5k_finisher";
pub const TEN_K_FINISHER: &str = "10k_finisher";
pub const HALF_MARATHON_FINISHER: &str = "half_marathon_finisher";
pub const MARATHON_FINISHER: &str = "marathon_finisher";
pub const ULTRA_FINISHER: &str = "ultra_finisher";
pub const HUNDRED_K_FINISHER: &str = "100k_finisher";
pub const TRIATHLON_FINISHER: &str = "triathlon_finisher";
pub const IRONMAN_FINISHER: &str = "ironman_finisher";
pub const CENTURY_RIDE: &str = "century_ride";

// ==================== 竞技 ====================
pub const HYROX_FINISHER: &str = "hyrox_finisher";
pub const SPARTAN_FINISHER: &str = "spartan_finisher";
pub const MEET_DAY: &str = "meet_day";
pub const PODIUM_FINISH: &str = "podium_finish";
pub const CROSSFIT_OPEN: &str = "crossfit_open";

/// 训练次数里程碑档位（升序）
pub const WORKOUT_MILESTONE_TIERS: [(&str, u32); 5] = [
    (FIRST_WORKOUT, 1),
    (WORKOUTS_10, 10),
    (WORKOUTS_50, 50),
    (WORKOUTS_100, 100),
    (WORKOUTS_365, 365),
];

/// 内置目录的全部徽章定义
pub fn definitions() -> Vec<BadgeDefinition> {
    let mut definitions = Vec::new();

    definitions.extend(strength_badges());
    definitions.extend(milestone_badges());
    definitions.extend(endurance_badges());
    definitions.extend(competition_badges());

    definitions
}

fn strength_badges() -> Vec<BadgeDefinition> {
    use BadgeCategory::Strength;

    vec![
        BadgeDefinition::stat(
            THOUSAND_LB_CLUB,
            "1000lb Club",
            "🏋️",
            "Squat, bench and deadlift a combined 1,000 lb",
            Strength,
            StatCriterion::big_three_total(1000.0),
        ),
        BadgeDefinition::stat(
            FIFTEEN_HUNDRED_LB_CLUB,
            "1500lb Club",
            "🦍",
            "Squat, bench and deadlift a combined 1,500 lb",
            Strength,
            StatCriterion::big_three_total(1500.0),
        ),
        BadgeDefinition::stat(
            BODYWEIGHT_BENCH,
            "Bodyweight Bench",
            "🛏️",
            "Bench press your own bodyweight",
            Strength,
            StatCriterion::BodyweightMultiple {
                lift: Lift::Bench,
                multiple: 1.0,
            },
        ),
        BadgeDefinition::stat(
            DOUBLE_BODYWEIGHT_SQUAT,
            "Double Bodyweight Squat",
            "🦵",
            "Squat twice your bodyweight",
            Strength,
            StatCriterion::BodyweightMultiple {
                lift: Lift::Squat,
                multiple: 2.0,
            },
        ),
        BadgeDefinition::stat(
            BODYWEIGHT_OHP,
            "Bodyweight Press",
            "🙌",
            "Strict press your own bodyweight overhead",
            Strength,
            StatCriterion::BodyweightMultiple {
                lift: Lift::OverheadPress,
                multiple: 1.0,
            },
        ),
        BadgeDefinition::stat(
            TWO_PLATE_BENCH,
            "Two Plate Bench",
            "🥈",
            "Bench press 225 lb",
            Strength,
            StatCriterion::LiftAtLeast {
                lift: Lift::Bench,
                weight: 225.0,
            },
        ),
        BadgeDefinition::stat(
            THREE_PLATE_SQUAT,
            "Three Plate Squat",
            "🥉",
            "Squat 315 lb",
            Strength,
            StatCriterion::LiftAtLeast {
                lift: Lift::Squat,
                weight: 315.0,
            },
        ),
        BadgeDefinition::stat(
            FOUR_PLATE_DEADLIFT,
            "Four Plate Deadlift",
            "🔱",
            "Deadlift 405 lb",
            Strength,
            StatCriterion::LiftAtLeast {
                lift: Lift::Deadlift,
                weight: 405.0,
            },
        ),
    ]
}

fn milestone_badges() -> Vec<BadgeDefinition> {
    let names = [
        ("First Rep", "🌱", "Complete your first workout"),
        ("Getting Consistent", "🔟", "Complete 10 workouts"),
        ("Half Century", "🔥", "Complete 50 workouts"),
        ("Centurion", "💯", "Complete 100 workouts"),
        ("Year of Iron", "📅", "Complete 365 workouts"),
    ];

    WORKOUT_MILESTONE_TIERS
        .iter()
        .zip(names)
        .map(|(&(id, count), (name, emoji, description))| {
            BadgeDefinition::stat(
                id,
                name,
                emoji,
                description,
                BadgeCategory::Milestone,
                StatCriterion::WorkoutsAtLeast { count },
            )
        })
        .collect()
}

/// 以数字开头的更长距离（如 "55k"、"110k"），用于排除子串误匹配
fn digit_prefixed(distance: &str) -> Vec<String> {
    (0..10).map(|d| format!("{}{}", d, distance)).collect()
}

fn endurance_badges() -> Vec<BadgeDefinition> {
    use BadgeCategory::Endurance;

    vec![
        BadgeDefinition::workout(
            FIVE_K_FINISHER,
            "5K Finisher",
            "👟",
            "Complete a 5K race",
            Endurance,
            NameCriterion::contains_any(["5k", "parkrun"]).excluding(digit_prefixed("5k")),
        ),
        BadgeDefinition::workout(
            TEN_K_FINISHER,
            "10K Finisher",
            "🏃",
            "Complete a 10K race",
            Endurance,
            NameCriterion::contains_any(["10k"]).excluding(digit_prefixed("10k")),
        ),
        BadgeDefinition::workout(
            HALF_MARATHON_FINISHER,
            "Half Marathoner",
            "🥈",
            "Complete a half marathon",
            Endurance,
            NameCriterion::contains_any(["half marathon", "half-marathon"]),
        ),
        BadgeDefinition::workout(
            MARATHON_FINISHER,
            "Marathoner",
            "🏅",
            "Complete a full marathon",
            Endurance,
            NameCriterion::contains_all(["marathon"]).excluding(["half"]),
        ),
        BadgeDefinition::workout(
            ULTRA_FINISHER,
            "Ultra Runner",
            "⛰️",
            "Complete an ultramarathon",
            Endurance,
            NameCriterion::contains_any(["ultra", "50k", "100k", "50 mile", "100 mile"]),
        ),
        BadgeDefinition::workout(
            HUNDRED_K_FINISHER,
            "100K Finisher",
            "🌄",
            "Complete a 100K race",
            Endurance,
            NameCriterion::contains_any(["100k"]),
        ),
        BadgeDefinition::workout(
            TRIATHLON_FINISHER,
            "Triathlete",
            "🏊",
            "Complete a triathlon",
            Endurance,
            NameCriterion::contains_any(["triathlon", "ironman", "70.3"]),
        ),
        BadgeDefinition::workout(
            IRONMAN_FINISHER,
            "Ironman",
            "🦾",
            "Complete a full Ironman",
            Endurance,
            NameCriterion::contains_all(["ironman"]).excluding(["70.3", "half"]),
        ),
        BadgeDefinition::manual(
            CENTURY_RIDE,
            "Century Ride",
            "🚴",
            "Ride 100 miles in a single day",
            Endurance,
        ),
    ]
}

fn competition_badges() -> Vec<BadgeDefinition> {
    use BadgeCategory::Competition;

    vec![
        BadgeDefinition::workout(
            HYROX_FINISHER,
            "HYROX Finisher",
            "🏁",
            "Complete a HYROX race",
            Competition,
            NameCriterion::contains_any(["hyrox"]),
        ),
        BadgeDefinition::workout(
            SPARTAN_FINISHER,
            "Spartan",
            "🛡️",
            "Complete a Spartan race",
            Competition,
            NameCriterion::contains_all(["spartan"]),
        ),
        BadgeDefinition::manual(
            MEET_DAY,
            "Meet Day",
            "🎽",
            "Compete in a powerlifting or weightlifting meet",
            Competition,
        ),
        BadgeDefinition::manual(
            PODIUM_FINISH,
            "Podium",
            "🥇",
            "Finish on the podium at any competition",
            Competition,
        ),
        BadgeDefinition::manual(
            CROSSFIT_OPEN,
            "Open Athlete",
            "📣",
            "Submit scores for every CrossFit Open workout",
            Competition,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_definitions_have_unique_ids() {
        let defs = definitions();
        let ids: HashSet<&str> = defs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), defs.len());
    }

    #[test]
    fn test_every_criterion_is_valid() {
        use crate::models::BadgeKind;

        for def in definitions() {
            let result = match &def.kind {
                BadgeKind::AutomaticStat { criterion } => criterion.validate(),
                BadgeKind::AutomaticWorkout { criterion } => criterion.validate(),
                BadgeKind::Manual => Ok(()),
            };
            assert!(result.is_ok(), "invalid criterion on {}", def.id);
        }
    }

    #[test]
    fn test_milestone_tiers_are_ascending() {
        let counts: Vec<u32> = WORKOUT_MILESTONE_TIERS.iter().map(|(_, c)| *c).collect();
        assert!(counts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_category_is_populated() {
        let defs = definitions();
        for category in BadgeCategory::ALL {
            assert!(defs.iter().any(|d| d.category == category), "{}", category);
        }
    }
}
