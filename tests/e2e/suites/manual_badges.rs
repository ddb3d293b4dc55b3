//! 手动徽章流程测试

use crate::fixtures::TestEnvironment;

#[tokio::test]
async fn test_manual_badges_round_trip() {
    let env = TestEnvironment::new();

    for id in ["meet_day", "podium_finish", "crossfit_open"] {
        assert!(env.awarder.award_manual("athlete", id).await.unwrap().is_some());
    }
    assert!(env.awarder.award_manual("athlete", "meet_day").await.unwrap().is_none());

    assert!(env.awarder.unaward_manual("athlete", "podium_finish").await.unwrap());
    assert_eq!(env.held_ids("athlete").await, vec!["meet_day", "crossfit_open"]);

    let held = env.awarder.held_badges("athlete").await.unwrap();
    assert!(held.iter().all(|h| h.definition.is_manual()));
}

#[tokio::test]
async fn test_automatic_badges_cannot_be_removed_manually() {
    let env = TestEnvironment::new();
    env.awarder
        .on_workout_completed("athlete", &badge_engine::Workout::new("HYROX Hamburg", true))
        .await
        .unwrap();

    let err = env
        .awarder
        .unaward_manual("athlete", "hyrox_finisher")
        .await
        .unwrap_err();

    assert_eq!(err.code(), "NOT_MANUAL");
    assert_eq!(env.held_ids("athlete").await, vec!["hyrox_finisher"]);
}
