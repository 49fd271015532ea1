// ABOUTME: Demo schedule seeder for the Gatofit schedule engine
// ABOUTME: Populates a browsable demo program with content, ad-hoc tasks, and a workout log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! Demo schedule seeder for the Gatofit schedule engine.
//!
//! Seeds a fresh database with an admin program enrollment, two weeks of day
//! assignments, the content library rows they reference, a couple of ad-hoc
//! tasks, and one logged workout, then resolves today's day view and prints
//! what a client would see.
//!
//! Content rows use fixed ids, so point the seeder at a fresh database file.
//!
//! Usage:
//! ```bash
//! # Seed the default database location
//! cargo run --bin seed-demo-schedule
//!
//! # Seed a specific database and user
//! cargo run --bin seed-demo-schedule -- --database-url sqlite:./demo.db --user-id <uuid>
//!
//! # Verbose output
//! cargo run --bin seed-demo-schedule -- -v
//! ```

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use gatofit_schedule_engine::config::EngineConfig;
use gatofit_schedule_engine::constants::{defaults, env_vars};
use gatofit_schedule_engine::context::{DataContext, NotificationContext};
use gatofit_schedule_engine::database_plugins::factory::Database;
use gatofit_schedule_engine::database_plugins::DatabaseProvider;
use gatofit_schedule_engine::engine::DayViewService;
use gatofit_schedule_engine::models::{
    ActivityKind, DocumentSummary, NutritionPlanSummary, ProgramDayAssignment, ProgramEnrollment,
    ProgramSource, RoutineSummary, SurveySummary, UpsertScheduledTaskRequest, VideoSummary,
    WorkoutLog,
};
use std::env;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Program id shared by the enrollment and every day assignment
const DEMO_PROGRAM_ID: &str = "demo-strength-12";

#[derive(Parser)]
#[command(
    name = "seed-demo-schedule",
    about = "Gatofit Schedule Engine Demo Seeder",
    long_about = "Populate a database with a demo program schedule for browsing and testing"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Seed for a specific user id (generates one if not specified)
    #[arg(long)]
    user_id: Option<Uuid>,

    /// How many days before today the program started
    #[arg(long, default_value = "8")]
    started_days_ago: i64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Routines referenced by the demo program's workout slots
fn demo_routines() -> Vec<RoutineSummary> {
    vec![
        RoutineSummary {
            id: "routine-push".to_owned(),
            name: "Push Day".to_owned(),
            routine_type: Some("strength".to_owned()),
            description: Some("Chest, shoulders, and triceps".to_owned()),
            estimated_duration_minutes: Some(55),
            exercise_count: Some(7),
        },
        RoutineSummary {
            id: "routine-pull".to_owned(),
            name: "Pull Day".to_owned(),
            routine_type: Some("strength".to_owned()),
            description: Some("Back and biceps".to_owned()),
            estimated_duration_minutes: Some(50),
            exercise_count: Some(6),
        },
        RoutineSummary {
            id: "routine-legs".to_owned(),
            name: "Leg Day".to_owned(),
            routine_type: Some("strength".to_owned()),
            description: Some("Squat-focused lower body session".to_owned()),
            estimated_duration_minutes: Some(60),
            exercise_count: Some(6),
        },
    ]
}

/// Videos referenced by program slots and one ad-hoc task
fn demo_videos() -> Vec<VideoSummary> {
    vec![
        VideoSummary {
            id: "video-warmup".to_owned(),
            title: "Full Body Warmup".to_owned(),
            description: Some("10 minute pre-session routine".to_owned()),
            platform_video_id: Some("yt-demo-warmup".to_owned()),
            video_url: Some("https://videos.gatofit.test/warmup".to_owned()),
        },
        VideoSummary {
            id: "video-mobility".to_owned(),
            title: "Evening Mobility Flow".to_owned(),
            description: Some("20 minute hip and shoulder mobility".to_owned()),
            platform_video_id: Some("yt-demo-mobility".to_owned()),
            video_url: Some("https://videos.gatofit.test/mobility".to_owned()),
        },
    ]
}

fn assignment(
    week_number: u32,
    day_of_week: u8,
    order_in_day: i32,
    kind: ActivityKind,
    content_id: Option<&str>,
) -> ProgramDayAssignment {
    ProgramDayAssignment {
        id: Uuid::new_v4().to_string(),
        program_id: DEMO_PROGRAM_ID.to_owned(),
        week_number,
        day_of_week,
        order_in_day,
        kind,
        content_id: content_id.map(ToOwned::to_owned),
        notes: None,
    }
}

/// One training week of the demo program; identical across both seeded weeks
fn demo_week(week_number: u32) -> Vec<ProgramDayAssignment> {
    vec![
        // Monday: push + nutrition
        assignment(week_number, 0, 0, ActivityKind::Nutrition, Some("plan-cut")),
        assignment(week_number, 0, 1, ActivityKind::Workout, Some("routine-push")),
        // Wednesday: pull + warmup video
        assignment(week_number, 2, 0, ActivityKind::Video, Some("video-warmup")),
        assignment(week_number, 2, 1, ActivityKind::Workout, Some("routine-pull")),
        // Friday: legs + technique document
        assignment(week_number, 4, 0, ActivityKind::Workout, Some("routine-legs")),
        assignment(week_number, 4, 1, ActivityKind::Document, Some("doc-squat-guide")),
        // Saturday: weekly check-in survey + measurement checkpoint
        assignment(week_number, 5, 0, ActivityKind::Survey, Some("survey-weekly")),
        assignment(week_number, 5, 1, ActivityKind::Evolution, None),
    ]
}

async fn seed_content(database: &Database) -> Result<usize> {
    let mut created = 0;

    for routine in demo_routines() {
        database.create_routine(&routine).await?;
        created += 1;
    }

    database
        .create_nutrition_plan(&NutritionPlanSummary {
            id: "plan-cut".to_owned(),
            name: "Cut Phase Nutrition".to_owned(),
            description: Some("High protein deficit plan".to_owned()),
        })
        .await?;
    created += 1;

    for video in demo_videos() {
        database.create_library_video(&video).await?;
        created += 1;
    }

    database
        .create_library_document(&DocumentSummary {
            id: "doc-squat-guide".to_owned(),
            title: "Squat Technique Guide".to_owned(),
            description: Some("Setup, depth, and common faults".to_owned()),
            file_url: Some("https://docs.gatofit.test/squat-guide.pdf".to_owned()),
            file_name: Some("squat-guide.pdf".to_owned()),
        })
        .await?;
    created += 1;

    database
        .create_library_survey(&SurveySummary {
            id: "survey-weekly".to_owned(),
            title: "Weekly Check-in".to_owned(),
            description: Some("Energy, sleep, and soreness".to_owned()),
            is_active: true,
        })
        .await?;
    created += 1;

    Ok(created)
}

async fn seed_program(database: &Database, user_id: Uuid, started_days_ago: i64) -> Result<usize> {
    let enrollment = ProgramEnrollment {
        id: Uuid::new_v4().to_string(),
        user_id,
        source: ProgramSource::Admin,
        program_id: DEMO_PROGRAM_ID.to_owned(),
        started_at: Utc::now() - Duration::days(started_days_ago),
        is_active: true,
        created_at: Utc::now(),
    };
    database.create_program_enrollment(&enrollment).await?;

    let mut created = 0;
    for week_number in 1..=2 {
        for day_assignment in demo_week(week_number) {
            database
                .create_program_day_assignment(&day_assignment)
                .await?;
            created += 1;
        }
    }

    Ok(created)
}

async fn seed_tasks(database: &Database, user_id: Uuid) -> Result<usize> {
    let today = Utc::now().date_naive();

    database
        .upsert_scheduled_task(&UpsertScheduledTaskRequest {
            user_id,
            date: today,
            kind: ActivityKind::Video,
            content_id: Some("video-mobility".to_owned()),
            title: "Evening Mobility Flow".to_owned(),
            notes: Some("Added from the coach chat".to_owned()),
            is_completed: false,
            completed_at: None,
        })
        .await?;

    database
        .upsert_scheduled_task(&UpsertScheduledTaskRequest {
            user_id,
            date: today + Duration::days(1),
            kind: ActivityKind::Evolution,
            content_id: None,
            title: "Measurement check-in".to_owned(),
            notes: None,
            is_completed: false,
            completed_at: None,
        })
        .await?;

    Ok(2)
}

async fn seed_workout_log(database: &Database, user_id: Uuid) -> Result<()> {
    database
        .create_workout_log(&WorkoutLog {
            id: Uuid::new_v4().to_string(),
            user_id,
            routine_id: "routine-push".to_owned(),
            workout_date: Utc::now() - Duration::days(1),
            duration_minutes: Some(52),
            notes: Some("Felt strong, added 2.5kg to bench".to_owned()),
        })
        .await?;
    Ok(())
}

async fn print_today(database: Arc<Database>, user_id: Uuid) -> Result<()> {
    let data = DataContext::new(database);
    let service = DayViewService::from_context(
        &data,
        NotificationContext::disabled(),
        EngineConfig::default(),
    );

    let today = Utc::now().date_naive();
    let outcome = service.day_view(user_id, today).await?;

    let Some(view) = outcome.into_view() else {
        info!("Resolution was superseded, nothing to show");
        return Ok(());
    };

    info!(
        "Today ({}) resolves from source: {}",
        view.date,
        view.source
            .map_or("none (rest day)", |source| source.as_str())
    );
    for activity in &view.activities {
        info!(
            "  [{:>9}] {} (completed: {})",
            activity.kind.as_str(),
            activity.content.title().unwrap_or("Measurement checkpoint"),
            activity.is_completed
        );
    }
    info!("Day complete: {}", view.day_complete);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Gatofit Schedule Engine Demo Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var(env_vars::DATABASE_URL).ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());

    info!("Connecting to database: {}", database_url);
    let database = Arc::new(Database::new(&database_url).await?);

    let user_id = args.user_id.unwrap_or_else(Uuid::new_v4);
    info!("Seeding schedule for user: {}", user_id);

    info!("Step 1: Creating content library entries...");
    let content_count = seed_content(&database).await?;
    info!("  Created {} content entries", content_count);

    info!(
        "Step 2: Creating program enrollment and assignments (started {} days ago)...",
        args.started_days_ago
    );
    let assignment_count = seed_program(&database, user_id, args.started_days_ago).await?;
    info!("  Created 1 enrollment and {} assignments", assignment_count);

    info!("Step 3: Creating ad-hoc scheduled tasks...");
    let task_count = seed_tasks(&database, user_id).await?;
    info!("  Created {} tasks", task_count);

    info!("Step 4: Logging yesterday's workout...");
    seed_workout_log(&database, user_id).await?;

    info!("");
    info!("=== Seeding Complete ===");
    print_today(database, user_id).await?;

    info!("");
    info!("Browse other dates with the same user id to see the program unfold.");

    Ok(())
}
