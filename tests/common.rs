// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database creation, content seeding, and service wiring helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `gatofit_schedule_engine`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use gatofit_schedule_engine::{
    config::EngineConfig,
    context::{DataContext, NotificationContext},
    database_plugins::{factory::Database, DatabaseProvider},
    engine::DayViewService,
    models::{
        ActivityContent, ActivityKind, ActivityOrigin, ContentItem, DocumentSummary,
        NutritionPlanSummary, ProgramDayAssignment, ProgramEnrollment, ProgramSource,
        ResolvedActivity, RoutineSummary, SurveySummary, VideoSummary,
    },
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Wire a day-view service with default config and no notification channel
pub fn create_test_service(database: Arc<Database>) -> DayViewService<Database> {
    let data = DataContext::new(database);
    DayViewService::from_context(&data, NotificationContext::disabled(), EngineConfig::default())
}

/// Calendar date literal for test fixtures
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// An instant the given number of days before now
pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// Seed an active enrollment starting at the given instant
pub async fn seed_enrollment(
    database: &Database,
    user_id: Uuid,
    source: ProgramSource,
    program_id: &str,
    started_at: DateTime<Utc>,
) -> Result<()> {
    database
        .create_program_enrollment(&ProgramEnrollment {
            id: Uuid::new_v4().to_string(),
            user_id,
            source,
            program_id: program_id.to_owned(),
            started_at,
            is_active: true,
            created_at: Utc::now(),
        })
        .await
}

/// Seed one program day assignment
pub async fn seed_assignment(
    database: &Database,
    program_id: &str,
    week_number: u32,
    day_of_week: u8,
    order_in_day: i32,
    kind: ActivityKind,
    content_id: Option<&str>,
) -> Result<()> {
    database
        .create_program_day_assignment(&ProgramDayAssignment {
            id: Uuid::new_v4().to_string(),
            program_id: program_id.to_owned(),
            week_number,
            day_of_week,
            order_in_day,
            kind,
            content_id: content_id.map(ToOwned::to_owned),
            notes: None,
        })
        .await
}

/// Seed a routine content row
pub async fn seed_routine(database: &Database, id: &str, name: &str) -> Result<()> {
    database
        .create_routine(&RoutineSummary {
            id: id.to_owned(),
            name: name.to_owned(),
            routine_type: Some("strength".to_owned()),
            description: None,
            estimated_duration_minutes: Some(45),
            exercise_count: Some(6),
        })
        .await
}

/// Seed a nutrition plan content row
pub async fn seed_nutrition_plan(database: &Database, id: &str, name: &str) -> Result<()> {
    database
        .create_nutrition_plan(&NutritionPlanSummary {
            id: id.to_owned(),
            name: name.to_owned(),
            description: None,
        })
        .await
}

/// Seed a library video content row
pub async fn seed_video(database: &Database, id: &str, title: &str) -> Result<()> {
    database
        .create_library_video(&VideoSummary {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            platform_video_id: None,
            video_url: None,
        })
        .await
}

/// Seed a library document content row
pub async fn seed_document(database: &Database, id: &str, title: &str) -> Result<()> {
    database
        .create_library_document(&DocumentSummary {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            file_url: None,
            file_name: None,
        })
        .await
}

/// Seed a library survey content row
pub async fn seed_survey(database: &Database, id: &str, title: &str) -> Result<()> {
    database
        .create_library_survey(&SurveySummary {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            is_active: true,
        })
        .await
}

/// Build a program-origin activity carrying resolved content
pub fn program_activity(kind: ActivityKind, content_id: &str, title: &str) -> ResolvedActivity {
    let content = match kind {
        ActivityKind::Workout => ActivityContent::Item(ContentItem::Routine(RoutineSummary {
            id: content_id.to_owned(),
            name: title.to_owned(),
            routine_type: None,
            description: None,
            estimated_duration_minutes: None,
            exercise_count: None,
        })),
        ActivityKind::Nutrition => {
            ActivityContent::Item(ContentItem::NutritionPlan(NutritionPlanSummary {
                id: content_id.to_owned(),
                name: title.to_owned(),
                description: None,
            }))
        }
        ActivityKind::Video => ActivityContent::Item(ContentItem::Video(VideoSummary {
            id: content_id.to_owned(),
            title: title.to_owned(),
            description: None,
            platform_video_id: None,
            video_url: None,
        })),
        ActivityKind::Document => ActivityContent::Item(ContentItem::Document(DocumentSummary {
            id: content_id.to_owned(),
            title: title.to_owned(),
            description: None,
            file_url: None,
            file_name: None,
        })),
        ActivityKind::Survey => ActivityContent::Item(ContentItem::Survey(SurveySummary {
            id: content_id.to_owned(),
            title: title.to_owned(),
            description: None,
            is_active: true,
        })),
        ActivityKind::Evolution => ActivityContent::Checkpoint,
    };

    ResolvedActivity {
        kind,
        content,
        task_id: None,
        is_completed: false,
        origin: ActivityOrigin::Program,
        order_in_day: 0,
        notes: None,
    }
}
