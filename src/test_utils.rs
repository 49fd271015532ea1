// ABOUTME: Test utilities for creating schedule fixtures in a consistent way
// ABOUTME: Centralizes test data creation to avoid duplication across tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use crate::models::{
    ActivityContent, ActivityKind, ActivityOrigin, ContentItem, DocumentSummary,
    NutritionPlanSummary, ProgramDayAssignment, ProgramEnrollment, ProgramSource, ResolvedActivity,
    RoutineSummary, ScheduledTask, SurveySummary, VideoSummary,
};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Create a test enrollment active since the given instant
#[must_use]
pub fn create_test_enrollment(
    user_id: Uuid,
    source: ProgramSource,
    program_id: &str,
    started_at: DateTime<Utc>,
) -> ProgramEnrollment {
    ProgramEnrollment {
        id: Uuid::new_v4().to_string(),
        user_id,
        source,
        program_id: program_id.to_owned(),
        started_at,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Create a test program day assignment
#[must_use]
pub fn create_test_assignment(
    program_id: &str,
    week_number: u32,
    day_of_week: u8,
    order_in_day: i32,
    kind: ActivityKind,
    content_id: Option<&str>,
) -> ProgramDayAssignment {
    ProgramDayAssignment {
        id: Uuid::new_v4().to_string(),
        program_id: program_id.to_owned(),
        week_number,
        day_of_week,
        order_in_day,
        kind,
        content_id: content_id.map(ToOwned::to_owned),
        notes: None,
    }
}

/// Create a test scheduled task row
#[must_use]
pub fn create_test_task(
    user_id: Uuid,
    date: NaiveDate,
    kind: ActivityKind,
    content_id: Option<&str>,
    is_completed: bool,
) -> ScheduledTask {
    ScheduledTask {
        id: Uuid::new_v4().to_string(),
        user_id,
        date,
        kind,
        content_id: content_id.map(ToOwned::to_owned),
        title: "Test task".to_owned(),
        notes: None,
        is_completed,
        completed_at: is_completed.then(Utc::now),
        created_at: Utc::now(),
    }
}

/// Create resolved content of the matching kind
///
/// Evolution has no backing library, so it yields the checkpoint marker and
/// ignores the id and title.
#[must_use]
pub fn create_test_content(kind: ActivityKind, content_id: &str, title: &str) -> ActivityContent {
    let item = match kind {
        ActivityKind::Workout => ContentItem::Routine(RoutineSummary {
            id: content_id.to_owned(),
            name: title.to_owned(),
            routine_type: None,
            description: None,
            estimated_duration_minutes: None,
            exercise_count: None,
        }),
        ActivityKind::Nutrition => ContentItem::NutritionPlan(NutritionPlanSummary {
            id: content_id.to_owned(),
            name: title.to_owned(),
            description: None,
        }),
        ActivityKind::Video => ContentItem::Video(VideoSummary {
            id: content_id.to_owned(),
            title: title.to_owned(),
            description: None,
            platform_video_id: None,
            video_url: None,
        }),
        ActivityKind::Document => ContentItem::Document(DocumentSummary {
            id: content_id.to_owned(),
            title: title.to_owned(),
            description: None,
            file_url: None,
            file_name: None,
        }),
        ActivityKind::Survey => ContentItem::Survey(SurveySummary {
            id: content_id.to_owned(),
            title: title.to_owned(),
            description: None,
            is_active: true,
        }),
        ActivityKind::Evolution => return ActivityContent::Checkpoint,
    };
    ActivityContent::Item(item)
}

/// Create a program-origin activity with resolved library content
#[must_use]
pub fn create_program_activity(
    kind: ActivityKind,
    content_id: &str,
    title: &str,
) -> ResolvedActivity {
    ResolvedActivity {
        kind,
        content: create_test_content(kind, content_id, title),
        task_id: None,
        is_completed: false,
        origin: ActivityOrigin::Program,
        order_in_day: 0,
        notes: None,
    }
}

/// Create an evolution checkpoint activity
#[must_use]
pub fn create_checkpoint_activity(origin: ActivityOrigin) -> ResolvedActivity {
    ResolvedActivity {
        kind: ActivityKind::Evolution,
        content: ActivityContent::Checkpoint,
        task_id: None,
        is_completed: false,
        origin,
        order_in_day: 0,
        notes: None,
    }
}
