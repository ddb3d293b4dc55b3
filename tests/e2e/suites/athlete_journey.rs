//! 运动员成长流程测试

use crate::fixtures::{race_season, strength_progression, TestEnvironment};

#[tokio::test]
async fn test_race_season_surfaces_one_badge_per_race() {
    let env = TestEnvironment::new();

    let mut surfaced = Vec::new();
    for workout in race_season() {
        let outcome = env
            .awarder
            .on_workout_completed("runner", &workout)
            .await
            .unwrap();
        surfaced.extend(outcome.surfaced);
    }

    assert_eq!(
        surfaced,
        vec![
            "5k_finisher",
            "10k_finisher",
            "half_marathon_finisher",
            "marathon_finisher",
        ]
    );
    assert_eq!(env.held_ids("runner").await.len(), 4);
}

#[tokio::test]
async fn test_strength_progression_awards_each_badge_once() {
    let env = TestEnvironment::with_policy("all");

    let mut per_snapshot = Vec::new();
    for stats in strength_progression() {
        let outcome = env.awarder.on_stats_recomputed("lifter", &stats).await.unwrap();
        per_snapshot.push(outcome.surfaced);
    }

    assert_eq!(per_snapshot[0], vec!["bodyweight_bench", "first_workout"]);
    assert_eq!(
        per_snapshot[1],
        vec![
            "1000lb_club",
            "two_plate_bench",
            "three_plate_squat",
            "four_plate_deadlift",
            "10_workouts",
        ]
    );
    assert_eq!(
        per_snapshot[2],
        vec!["double_bodyweight_squat", "50_workouts", "100_workouts"]
    );

    let held = env.held_ids("lifter").await;
    let mut deduped = held.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(held.len(), deduped.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_athletes_in_parallel() {
    let env = TestEnvironment::new();

    let mut handles = Vec::new();
    for i in 0..20 {
        let awarder = env.awarder.clone();
        handles.push(tokio::spawn(async move {
            let athlete_id = format!("athlete-{}", i);
            for workout in race_season() {
                awarder.on_workout_completed(&athlete_id, &workout).await?;
            }
            for stats in strength_progression() {
                awarder.on_stats_recomputed(&athlete_id, &stats).await?;
            }
            Ok::<_, badge_award::AwardError>(athlete_id)
        }));
    }

    for handle in handles {
        let athlete_id = handle.await.unwrap().unwrap();
        assert_eq!(env.held_ids(&athlete_id).await.len(), 4 + 10);
    }
}
