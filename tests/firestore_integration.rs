// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Run with FIRESTORE_EMULATOR_HOST pointing at the emulator.
//!
//! The emulator provides a clean state for each test run.

use triplan::models::{CompetitionType, Plan, PreferredWeekdays, SportType, User, Workout, WorkoutType};

mod common;
use common::{date, test_db};

/// Generate a unique athlete ID for test isolation.
fn unique_athlete_id() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}

fn test_plan(athlete_id: u64, plan_id: &str) -> Plan {
    Plan {
        plan_id: plan_id.to_string(),
        athlete_id,
        complexity: 500,
        competition_date: date("2027-01-16"),
        competition_type: CompetitionType::RunMarathon,
        competition_distance: None,
        created_at: chrono::Utc::now().to_rfc3339(),
        workouts: vec![
            Workout {
                workout_id: 1,
                date: date("2026-10-19"),
                sport_type: SportType::Running,
                workout_type: WorkoutType::Endurance,
                duration_minutes: 60,
                completion: None,
            },
            Workout {
                workout_id: 2,
                date: date("2026-10-21"),
                sport_type: SportType::Running,
                workout_type: WorkoutType::Interval,
                duration_minutes: 40,
                completion: None,
            },
        ],
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_upsert_and_get() {
    require_emulator!();
    let db = test_db().await;
    let athlete_id = unique_athlete_id();

    assert!(db.get_user(athlete_id).await.unwrap().is_none());

    let now = chrono::Utc::now().to_rfc3339();
    let weekdays = PreferredWeekdays::new(vec![0, 2, 4]).unwrap();
    db.upsert_user(&User::new(athlete_id, weekdays.clone(), &now))
        .await
        .unwrap();

    let user = db.get_user(athlete_id).await.unwrap().unwrap();
    assert_eq!(user.preferred_weekdays, weekdays);
}

// ═══════════════════════════════════════════════════════════════════════════
// PLAN TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_replace_plan_overwrites_previous() {
    require_emulator!();
    let db = test_db().await;
    let athlete_id = unique_athlete_id();

    db.replace_plan(&test_plan(athlete_id, "first")).await.unwrap();
    let mut second = test_plan(athlete_id, "second");
    second.workouts.truncate(1);
    db.replace_plan(&second).await.unwrap();

    let stored = db.get_plan(athlete_id).await.unwrap().unwrap();
    assert_eq!(stored.plan_id, "second");
    assert_eq!(stored.workouts.len(), 1);
}

#[tokio::test]
async fn test_update_workout_date() {
    require_emulator!();
    let db = test_db().await;
    let athlete_id = unique_athlete_id();
    db.replace_plan(&test_plan(athlete_id, "p")).await.unwrap();

    let moved = db
        .update_workout_date(athlete_id, "p", 2, date("2026-10-22"))
        .await
        .unwrap();
    assert!(moved);

    let missing = db
        .update_workout_date(athlete_id, "p", 99, date("2026-10-22"))
        .await
        .unwrap();
    assert!(!missing);

    let wrong_plan = db
        .update_workout_date(athlete_id, "other", 1, date("2026-10-22"))
        .await
        .unwrap();
    assert!(!wrong_plan);

    let stored = db.get_plan(athlete_id).await.unwrap().unwrap();
    assert_eq!(stored.workouts[1].date, date("2026-10-22"));
    assert_eq!(stored.workouts[0].date, date("2026-10-19"));
}

#[tokio::test]
async fn test_delete_plan() {
    require_emulator!();
    let db = test_db().await;
    let athlete_id = unique_athlete_id();
    db.replace_plan(&test_plan(athlete_id, "p")).await.unwrap();

    assert!(db.delete_plan(athlete_id).await.unwrap());
    assert!(db.get_plan(athlete_id).await.unwrap().is_none());
    assert!(!db.delete_plan(athlete_id).await.unwrap());
}
