// ABOUTME: Integration tests for merging ad-hoc task rows into program activities
// ABOUTME: Covers completion attachment, standalone appends, and dangling content degradation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use gatofit_schedule_engine::{
    database_plugins::DatabaseProvider,
    engine::ScheduledOverlay,
    models::{ActivityContent, ActivityKind, ActivityOrigin, UpsertScheduledTaskRequest},
};
use uuid::Uuid;

mod common;
use common::{create_test_database, date, program_activity, seed_survey, seed_video};

#[tokio::test]
async fn test_matching_task_becomes_the_activitys_completion_record() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    let task = db
        .upsert_scheduled_task(&UpsertScheduledTaskRequest {
            user_id,
            date: selected,
            kind: ActivityKind::Video,
            content_id: Some("video-a".to_owned()),
            title: "Warmup".to_owned(),
            notes: None,
            is_completed: true,
            completed_at: Some(Utc::now()),
        })
        .await
        .expect("Failed to seed task");

    let overlay = ScheduledOverlay::new(db);
    let merged = overlay
        .merge(
            user_id,
            selected,
            vec![program_activity(ActivityKind::Video, "video-a", "Warmup")],
        )
        .await
        .expect("Merge failed");

    // Recognized as the same activity, not duplicated
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].task_id.as_deref(), Some(task.id.as_str()));
    assert!(merged[0].is_completed);
    assert_eq!(merged[0].origin, ActivityOrigin::Program);
}

#[tokio::test]
async fn test_unmatched_task_appends_as_standalone_with_joined_content() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    seed_survey(&db, "survey-a", "Weekly Check-in").await.expect("seed survey");
    db.upsert_scheduled_task(&UpsertScheduledTaskRequest {
        user_id,
        date: selected,
        kind: ActivityKind::Survey,
        content_id: Some("survey-a".to_owned()),
        title: "Check-in".to_owned(),
        notes: Some("From coach".to_owned()),
        is_completed: false,
        completed_at: None,
    })
    .await
    .expect("Failed to seed task");

    let overlay = ScheduledOverlay::new(db);
    let merged = overlay
        .merge(
            user_id,
            selected,
            vec![program_activity(ActivityKind::Video, "video-a", "Warmup")],
        )
        .await
        .expect("Merge failed");

    assert_eq!(merged.len(), 2);
    // Program item stays first and untouched
    assert_eq!(merged[0].kind, ActivityKind::Video);
    assert_eq!(merged[0].task_id, None);
    // Standalone item follows with library content joined
    assert_eq!(merged[1].kind, ActivityKind::Survey);
    assert_eq!(merged[1].origin, ActivityOrigin::Standalone);
    assert_eq!(merged[1].content.title(), Some("Weekly Check-in"));
    assert_eq!(merged[1].order_in_day, 1);
    assert_eq!(merged[1].notes.as_deref(), Some("From coach"));
    assert!(merged[1].task_id.is_some());
}

#[tokio::test]
async fn test_dangling_standalone_reference_degrades_to_missing() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    // References a video that was deleted from the library
    db.upsert_scheduled_task(&UpsertScheduledTaskRequest {
        user_id,
        date: selected,
        kind: ActivityKind::Video,
        content_id: Some("video-gone".to_owned()),
        title: "Old mobility video".to_owned(),
        notes: None,
        is_completed: false,
        completed_at: None,
    })
    .await
    .expect("Failed to seed task");

    let overlay = ScheduledOverlay::new(db);
    let merged = overlay
        .merge(user_id, selected, Vec::new())
        .await
        .expect("Merge failed");

    assert_eq!(merged.len(), 1);
    assert!(merged[0].content.is_missing());
    assert_eq!(merged[0].content.content_id(), Some("video-gone"));
    // The task's own title survives as the display fallback
    assert_eq!(merged[0].content.title(), Some("Old mobility video"));
}

#[tokio::test]
async fn test_evolution_task_resolves_to_checkpoint() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    db.upsert_scheduled_task(&UpsertScheduledTaskRequest {
        user_id,
        date: selected,
        kind: ActivityKind::Evolution,
        content_id: None,
        title: "Measurement check-in".to_owned(),
        notes: None,
        is_completed: true,
        completed_at: Some(Utc::now()),
    })
    .await
    .expect("Failed to seed task");

    let overlay = ScheduledOverlay::new(db);
    let merged = overlay
        .merge(user_id, selected, Vec::new())
        .await
        .expect("Merge failed");

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].kind, ActivityKind::Evolution);
    assert_eq!(merged[0].content, ActivityContent::Checkpoint);
    assert_eq!(merged[0].origin, ActivityOrigin::Standalone);
    assert!(merged[0].is_completed);
}

#[tokio::test]
async fn test_standalone_orders_continue_after_program_items() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 5, 6);

    seed_video(&db, "video-extra", "Extra Mobility").await.expect("seed video");
    seed_survey(&db, "survey-a", "Weekly Check-in").await.expect("seed survey");
    for (kind, content_id, title) in [
        (ActivityKind::Video, "video-extra", "Extra Mobility"),
        (ActivityKind::Survey, "survey-a", "Check-in"),
    ] {
        db.upsert_scheduled_task(&UpsertScheduledTaskRequest {
            user_id,
            date: selected,
            kind,
            content_id: Some(content_id.to_owned()),
            title: title.to_owned(),
            notes: None,
            is_completed: false,
            completed_at: None,
        })
        .await
        .expect("Failed to seed task");
    }

    let overlay = ScheduledOverlay::new(db);
    let merged = overlay
        .merge(
            user_id,
            selected,
            vec![
                program_activity(ActivityKind::Workout, "routine-a", "Push Day"),
                program_activity(ActivityKind::Nutrition, "plan-a", "Cut Phase"),
            ],
        )
        .await
        .expect("Merge failed");

    assert_eq!(merged.len(), 4);
    // Program block first, then the standalone block in task order
    assert_eq!(merged[0].origin, ActivityOrigin::Program);
    assert_eq!(merged[1].origin, ActivityOrigin::Program);
    assert_eq!(merged[2].origin, ActivityOrigin::Standalone);
    assert_eq!(merged[3].origin, ActivityOrigin::Standalone);
    assert_eq!(merged[2].order_in_day, 2);
    assert_eq!(merged[3].order_in_day, 3);

    let mut appended_kinds: Vec<ActivityKind> = merged[2..].iter().map(|a| a.kind).collect();
    appended_kinds.sort_by_key(|kind| kind.as_str().to_owned());
    assert_eq!(appended_kinds, vec![ActivityKind::Survey, ActivityKind::Video]);
}
