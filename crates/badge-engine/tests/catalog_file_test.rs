//! 目录文件加载集成测试

use std::fs;
use std::path::PathBuf;

use badge_engine::{
    AthleteStats, BadgeCatalog, BadgeCategory, BadgeEvaluator, CatalogError, Lift, Workout,
};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("badge-engine-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_toml_catalog() {
    let path = temp_file(
        "catalog.toml",
        r#"
[[badges]]
id = "pull_up_king"
name = "Pull-up King"
emoji = "🦍"
description = "Deadlift at least 500"
category = "strength"

[badges.kind]
type = "automatic-stat"

[badges.kind.criterion]
type = "lift_at_least"
lift = "deadlift"
weight = 500.0

[[badges]]
id = "trail_runner"
name = "Trail Runner"
emoji = "🌲"
description = "Finished a trail race"
category = "endurance"

[badges.kind]
type = "automatic-workout"

[badges.kind.criterion]
all_of = ["Trail"]
none_of = ["Walk"]
"#,
    );

    let catalog = BadgeCatalog::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.lookup("trail_runner").map(|d| d.category),
        Some(BadgeCategory::Endurance)
    );

    let evaluator = BadgeEvaluator::new(&catalog);
    assert_eq!(
        evaluator.evaluate_workout(&Workout::new("Mountain TRAIL 30k", true)),
        vec!["trail_runner"]
    );
    assert!(evaluator
        .evaluate_workout(&Workout::new("Trail walk", true))
        .is_empty());
    assert_eq!(
        evaluator.evaluate_stats(&AthleteStats::new().with_lift(Lift::Deadlift, 500.0)),
        vec!["pull_up_king"]
    );
}

#[test]
fn test_builtin_catalog_survives_json_file() {
    let json = serde_json::to_string_pretty(&BadgeCatalog::builtin().to_file()).unwrap();
    let path = temp_file("builtin.json", &json);

    let catalog = BadgeCatalog::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(catalog.stats(), BadgeCatalog::builtin().stats());
    let ids: Vec<&str> = catalog.iter().map(|d| d.id.as_str()).collect();
    let builtin_ids: Vec<&str> = BadgeCatalog::builtin().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, builtin_ids);
}

#[test]
fn test_duplicate_ids_in_file_rejected() {
    let path = temp_file(
        "dupes.json",
        r#"{"badges": [
            {"id": "meet_day", "name": "A", "emoji": "🏋️", "description": "a",
             "category": "competition", "kind": {"type": "manual"}},
            {"id": "meet_day", "name": "B", "emoji": "🏋️", "description": "b",
             "category": "competition", "kind": {"type": "manual"}}
        ]}"#,
    );

    let err = BadgeCatalog::from_file(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "meet_day"));
}

#[test]
fn test_missing_file_is_load_error() {
    let path = std::env::temp_dir().join("badge-engine-does-not-exist.json");
    let err = BadgeCatalog::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Load(_)));
}
