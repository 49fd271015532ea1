// ABOUTME: Integration tests for the task, enrollment, workout, and survey stores
// ABOUTME: Covers natural-key upserts, partial uniqueness, schema checks, and day bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{NaiveDate, NaiveTime, Utc};
use gatofit_schedule_engine::{
    database_plugins::{factory::Database, DatabaseProvider},
    errors::SurveySubmissionError,
    models::{
        ActivityKind, ProgramDayAssignment, ProgramSource, UpsertScheduledTaskRequest, WorkoutLog,
    },
};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::{create_test_database, date, days_ago, seed_enrollment};

fn upsert_request(
    user_id: Uuid,
    selected: NaiveDate,
    kind: ActivityKind,
    content_id: Option<&str>,
    is_completed: bool,
) -> UpsertScheduledTaskRequest {
    UpsertScheduledTaskRequest {
        user_id,
        date: selected,
        kind,
        content_id: content_id.map(ToOwned::to_owned),
        title: "Task".to_owned(),
        notes: None,
        is_completed,
        completed_at: is_completed.then(Utc::now),
    }
}

async fn log_workout(db: &Database, user_id: Uuid, routine_id: &str, at: chrono::DateTime<Utc>) {
    db.create_workout_log(&WorkoutLog {
        id: Uuid::new_v4().to_string(),
        user_id,
        routine_id: routine_id.to_owned(),
        workout_date: at,
        duration_minutes: Some(40),
        notes: None,
    })
    .await
    .expect("Failed to log workout");
}

#[tokio::test]
async fn test_upsert_converges_on_the_natural_key() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    let created = db
        .upsert_scheduled_task(&upsert_request(
            user_id,
            selected,
            ActivityKind::Video,
            Some("video-a"),
            false,
        ))
        .await
        .expect("Insert failed");
    assert!(!created.is_completed);

    let flipped = db
        .upsert_scheduled_task(&upsert_request(
            user_id,
            selected,
            ActivityKind::Video,
            Some("video-a"),
            true,
        ))
        .await
        .expect("Update failed");

    assert_eq!(created.id, flipped.id, "Same slot must keep the same row");
    assert!(flipped.is_completed);
    assert!(flipped.completed_at.is_some());

    let tasks = db
        .get_scheduled_tasks(user_id, selected)
        .await
        .expect("Fetch failed");
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_null_content_tasks_share_one_row() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    // Evolution checkpoints have no content id; the natural key folds NULL
    // so repeated completion still converges
    let first = db
        .upsert_scheduled_task(&upsert_request(
            user_id,
            selected,
            ActivityKind::Evolution,
            None,
            true,
        ))
        .await
        .expect("Insert failed");
    let second = db
        .upsert_scheduled_task(&upsert_request(
            user_id,
            selected,
            ActivityKind::Evolution,
            None,
            true,
        ))
        .await
        .expect("Repeat upsert failed");

    assert_eq!(first.id, second.id);

    let tasks = db
        .get_scheduled_tasks(user_id, selected)
        .await
        .expect("Fetch failed");
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_distinct_content_ids_create_distinct_rows() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    for content_id in ["video-a", "video-b"] {
        db.upsert_scheduled_task(&upsert_request(
            user_id,
            selected,
            ActivityKind::Video,
            Some(content_id),
            false,
        ))
        .await
        .expect("Insert failed");
    }

    let tasks = db
        .get_scheduled_tasks(user_id, selected)
        .await
        .expect("Fetch failed");
    assert_eq!(tasks.len(), 2);
}

#[tokio::test]
async fn test_natural_key_lookup_matches_null_content() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    db.upsert_scheduled_task(&upsert_request(
        user_id,
        selected,
        ActivityKind::Evolution,
        None,
        false,
    ))
    .await
    .expect("Insert failed");

    let found = db
        .get_task_by_natural_key(user_id, selected, ActivityKind::Evolution, None)
        .await
        .expect("Lookup failed")
        .expect("Row must be found by its NULL-content key");
    assert_eq!(found.content_id, None);

    let missed = db
        .get_task_by_natural_key(user_id, selected, ActivityKind::Video, Some("video-a"))
        .await
        .expect("Lookup failed");
    assert_eq!(missed, None);
}

#[tokio::test]
async fn test_one_active_enrollment_per_source() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    seed_enrollment(&db, user_id, ProgramSource::Admin, "prog-1", days_ago(10))
        .await
        .expect("First enrollment failed");

    // A second active admin enrollment violates the partial unique index
    let duplicate =
        seed_enrollment(&db, user_id, ProgramSource::Admin, "prog-2", days_ago(5)).await;
    assert!(duplicate.is_err());

    // A different source is unaffected, and a deactivated row frees the slot
    seed_enrollment(&db, user_id, ProgramSource::Gatofit, "prog-3", days_ago(5))
        .await
        .expect("Other source must not collide");
    db.deactivate_enrollments(user_id, ProgramSource::Admin)
        .await
        .expect("Deactivation failed");
    seed_enrollment(&db, user_id, ProgramSource::Admin, "prog-4", days_ago(1))
        .await
        .expect("Re-enrollment after deactivation failed");

    let active = db
        .get_active_enrollment(user_id, ProgramSource::Admin)
        .await
        .expect("Fetch failed")
        .expect("An active admin enrollment must exist");
    assert_eq!(active.program_id, "prog-4");
}

#[tokio::test]
async fn test_assignments_require_content_except_evolution() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    let content_free_video = db
        .create_program_day_assignment(&ProgramDayAssignment {
            id: Uuid::new_v4().to_string(),
            program_id: "prog-1".to_owned(),
            week_number: 1,
            day_of_week: 0,
            order_in_day: 0,
            kind: ActivityKind::Video,
            content_id: None,
            notes: None,
        })
        .await;
    assert!(content_free_video.is_err(), "Non-evolution slots need content");

    db.create_program_day_assignment(&ProgramDayAssignment {
        id: Uuid::new_v4().to_string(),
        program_id: "prog-1".to_owned(),
        week_number: 1,
        day_of_week: 0,
        order_in_day: 1,
        kind: ActivityKind::Evolution,
        content_id: None,
        notes: None,
    })
    .await
    .expect("Evolution slots carry no content");
}

#[tokio::test]
async fn test_workout_lookup_respects_utc_day_bounds() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    let late_night = date(2024, 1, 10)
        .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap())
        .and_utc();
    let next_midnight = date(2024, 1, 11).and_time(NaiveTime::MIN).and_utc();

    log_workout(&db, user_id, "routine-late", late_night).await;
    log_workout(&db, user_id, "routine-early", next_midnight).await;
    // A second session of the same routine must not duplicate the id
    log_workout(&db, user_id, "routine-late", late_night).await;

    let on_the_tenth = db
        .get_workout_routine_ids_for_date(user_id, date(2024, 1, 10))
        .await
        .expect("Fetch failed");
    assert_eq!(on_the_tenth, vec!["routine-late".to_owned()]);

    let on_the_eleventh = db
        .get_workout_routine_ids_for_date(user_id, date(2024, 1, 11))
        .await
        .expect("Fetch failed");
    assert_eq!(on_the_eleventh, vec!["routine-early".to_owned()]);
}

#[tokio::test]
async fn test_file_backed_store_persists_across_reopen() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite:{}", temp_dir.path().join("schedule.db").display());
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    {
        let db = Database::new(&url).await.expect("First open failed");
        db.upsert_scheduled_task(&upsert_request(
            user_id,
            selected,
            ActivityKind::Video,
            Some("video-a"),
            true,
        ))
        .await
        .expect("Insert failed");
    }

    // Migrations are idempotent and committed rows survive the pool
    let reopened = Database::new(&url).await.expect("Reopen failed");
    let tasks = reopened
        .get_scheduled_tasks(user_id, selected)
        .await
        .expect("Fetch failed");
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].is_completed);
}

#[tokio::test]
async fn test_survey_duplicate_is_a_typed_rejection() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    db.submit_survey_response("survey-a", user_id, &json!({"energy": 4}))
        .await
        .expect("First response failed");

    let duplicate = db
        .submit_survey_response("survey-a", user_id, &json!({"energy": 5}))
        .await;
    assert!(matches!(
        duplicate,
        Err(SurveySubmissionError::Duplicate { .. })
    ));

    // Another user answers freely
    db.submit_survey_response("survey-a", Uuid::new_v4(), &json!({"energy": 3}))
        .await
        .expect("Different user must not collide");

    assert!(db
        .has_survey_response("survey-a", user_id)
        .await
        .expect("Check failed"));
}
