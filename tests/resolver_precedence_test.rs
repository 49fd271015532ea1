// ABOUTME: Integration tests for schedule source precedence resolution
// ABOUTME: Covers epoch sources, weekly fallback, standalone synthesis, and the empty case
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, NaiveTime, Utc};
use gatofit_schedule_engine::{
    database_plugins::DatabaseProvider,
    engine::ProgramResolver,
    models::{ActivityKind, ProgramSource, ScheduleSource, UpsertScheduledTaskRequest},
};
use uuid::Uuid;

mod common;
use common::{create_test_database, date, seed_enrollment};

/// Midnight UTC on the given calendar date
fn utc_start(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    date(year, month, day).and_time(NaiveTime::MIN).and_utc()
}

#[tokio::test]
async fn test_admin_program_wins_over_every_other_source() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    seed_enrollment(&db, user_id, ProgramSource::Admin, "admin-prog", utc_start(2024, 1, 1))
        .await
        .expect("Failed to seed admin enrollment");
    seed_enrollment(&db, user_id, ProgramSource::Gatofit, "gato-prog", utc_start(2024, 1, 1))
        .await
        .expect("Failed to seed gatofit enrollment");
    seed_enrollment(&db, user_id, ProgramSource::Weekly, "weekly-prog", utc_start(2024, 1, 1))
        .await
        .expect("Failed to seed weekly enrollment");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(user_id, date(2024, 1, 10))
        .await
        .expect("Resolution failed")
        .expect("Expected a resolved source");

    assert_eq!(resolved.source, ScheduleSource::Admin);
    assert_eq!(resolved.program_id.as_deref(), Some("admin-prog"));
    let day = resolved.day.expect("Admin program should project a day");
    // Jan 1 2024 is a Monday; nine elapsed days put Jan 10 in week 2, Wednesday
    assert_eq!(day.week_number, 2);
    assert_eq!(day.day_of_week, 2);
}

#[tokio::test]
async fn test_unstarted_admin_program_falls_through_to_gatofit() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    // Admin enrollment exists but only starts in February
    seed_enrollment(&db, user_id, ProgramSource::Admin, "admin-prog", utc_start(2024, 2, 1))
        .await
        .expect("Failed to seed admin enrollment");
    seed_enrollment(&db, user_id, ProgramSource::Gatofit, "gato-prog", utc_start(2024, 1, 1))
        .await
        .expect("Failed to seed gatofit enrollment");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(user_id, date(2024, 1, 10))
        .await
        .expect("Resolution failed")
        .expect("Expected a resolved source");

    assert_eq!(resolved.source, ScheduleSource::Gatofit);
    assert_eq!(resolved.program_id.as_deref(), Some("gato-prog"));
}

#[tokio::test]
async fn test_weekly_program_has_no_start_gate() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    // Enrolled in March, resolving January: weekly plans repeat forever and
    // ignore the enrollment epoch
    seed_enrollment(&db, user_id, ProgramSource::Weekly, "weekly-prog", utc_start(2024, 3, 1))
        .await
        .expect("Failed to seed weekly enrollment");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(user_id, date(2024, 1, 10))
        .await
        .expect("Resolution failed")
        .expect("Expected a resolved source");

    assert_eq!(resolved.source, ScheduleSource::Weekly);
    assert_eq!(resolved.program_id.as_deref(), Some("weekly-prog"));
    let day = resolved.day.expect("Weekly program should project a day");
    assert_eq!(day.week_number, 1);
    assert_eq!(day.day_of_week, 2);
}

#[tokio::test]
async fn test_task_rows_synthesize_the_standalone_source() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();
    let selected = date(2024, 1, 10);

    db.upsert_scheduled_task(&UpsertScheduledTaskRequest {
        user_id,
        date: selected,
        kind: ActivityKind::Video,
        content_id: Some("video-1".to_owned()),
        title: "Mobility".to_owned(),
        notes: None,
        is_completed: false,
        completed_at: None,
    })
    .await
    .expect("Failed to seed task");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(user_id, selected)
        .await
        .expect("Resolution failed")
        .expect("Expected a resolved source");

    assert_eq!(resolved.source, ScheduleSource::Standalone);
    assert_eq!(resolved.program_id, None);
    assert_eq!(resolved.day, None);
}

#[tokio::test]
async fn test_no_sources_resolves_to_none() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(Uuid::new_v4(), date(2024, 1, 10))
        .await
        .expect("Resolution failed");

    assert_eq!(resolved, None);
}

#[tokio::test]
async fn test_deactivated_enrollment_is_ignored() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    seed_enrollment(&db, user_id, ProgramSource::Admin, "admin-prog", utc_start(2024, 1, 1))
        .await
        .expect("Failed to seed admin enrollment");
    seed_enrollment(&db, user_id, ProgramSource::Gatofit, "gato-prog", utc_start(2024, 1, 1))
        .await
        .expect("Failed to seed gatofit enrollment");

    db.deactivate_enrollments(user_id, ProgramSource::Admin)
        .await
        .expect("Failed to deactivate admin enrollment");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(user_id, date(2024, 1, 10))
        .await
        .expect("Resolution failed")
        .expect("Expected a resolved source");

    assert_eq!(resolved.source, ScheduleSource::Gatofit);
}

#[tokio::test]
async fn test_future_program_with_no_fallback_resolves_to_none() {
    let db = create_test_database()
        .await
        .expect("Failed to create test database");
    let user_id = Uuid::new_v4();

    seed_enrollment(&db, user_id, ProgramSource::Admin, "admin-prog", utc_start(2024, 2, 1))
        .await
        .expect("Failed to seed admin enrollment");

    let resolver = ProgramResolver::new(db);
    let resolved = resolver
        .resolve(user_id, date(2024, 1, 10))
        .await
        .expect("Resolution failed");

    assert_eq!(resolved, None);
}
