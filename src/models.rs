// ABOUTME: Core domain models for schedule resolution and completion tracking
// ABOUTME: Program sources, activity kinds, content items, tasks, and day views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Domain Models
//!
//! Data structures shared across the engine: program enrollment and schedule
//! rows as stored, content library summaries, and the ephemeral resolved
//! activity/day-view types handed to the calling UI. Completion state is
//! always recomputed per resolution call and never persisted on these types.

use crate::constants::{activity_kinds, sources};
use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Program source kinds a user can be enrolled in
///
/// The three kinds are independent; a user may hold one active enrollment of
/// each simultaneously. Precedence across them is the resolver's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramSource {
    /// Coach-assigned curriculum (highest precedence)
    Admin,
    /// Vendor-authored multi-week curriculum
    Gatofit,
    /// Self-service weekly template, repeats indefinitely
    Weekly,
}

impl ProgramSource {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => sources::ADMIN,
            Self::Gatofit => sources::GATOFIT,
            Self::Weekly => sources::WEEKLY,
        }
    }
}

impl FromStr for ProgramSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            sources::ADMIN => Ok(Self::Admin),
            sources::GATOFIT => Ok(Self::Gatofit),
            sources::WEEKLY => Ok(Self::Weekly),
            _ => Err(AppError::invalid_input(format!("Invalid program source: {s}")).into()),
        }
    }
}

impl fmt::Display for ProgramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of a resolved day view
///
/// Extends [`ProgramSource`] with the pseudo-source synthesized when no
/// program matches but ad-hoc tasks exist for the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleSource {
    /// Coach-assigned curriculum
    Admin,
    /// Vendor multi-week curriculum
    Gatofit,
    /// Weekly template
    Weekly,
    /// No program matched; the day carries only ad-hoc tasks
    Standalone,
}

impl ScheduleSource {
    /// Convert to string for logging and serialization
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => sources::ADMIN,
            Self::Gatofit => sources::GATOFIT,
            Self::Weekly => sources::WEEKLY,
            Self::Standalone => sources::STANDALONE,
        }
    }
}

impl From<ProgramSource> for ScheduleSource {
    fn from(source: ProgramSource) -> Self {
        match source {
            ProgramSource::Admin => Self::Admin,
            ProgramSource::Gatofit => Self::Gatofit,
            ProgramSource::Weekly => Self::Weekly,
        }
    }
}

impl fmt::Display for ScheduleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content library kinds addressable by id lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Training routine
    Routine,
    /// Nutrition plan
    NutritionPlan,
    /// Library video
    Video,
    /// Library document
    Document,
    /// Library survey
    Survey,
}

impl ContentKind {
    /// Convert to string for logging
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::NutritionPlan => "nutrition_plan",
            Self::Video => "video",
            Self::Document => "document",
            Self::Survey => "survey",
        }
    }
}

/// The six activity kinds a program day or ad-hoc task can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Routine-backed training session
    Workout,
    /// Nutrition plan for the day (informational)
    Nutrition,
    /// Video to watch
    Video,
    /// Document to read
    Document,
    /// Survey to answer
    Survey,
    /// Evolution checkpoint (body-measurement prompt)
    Evolution,
}

impl ActivityKind {
    /// All kinds in deterministic aggregation order
    pub const ALL: [Self; 6] = [
        Self::Workout,
        Self::Nutrition,
        Self::Video,
        Self::Document,
        Self::Survey,
        Self::Evolution,
    ];

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => activity_kinds::WORKOUT,
            Self::Nutrition => activity_kinds::NUTRITION,
            Self::Video => activity_kinds::VIDEO,
            Self::Document => activity_kinds::DOCUMENT,
            Self::Survey => activity_kinds::SURVEY,
            Self::Evolution => activity_kinds::EVOLUTION,
        }
    }

    /// The content library this kind references, if any
    ///
    /// Evolution checkpoints carry no library content; their presence on a
    /// schedule row is the whole payload.
    #[must_use]
    pub const fn content_kind(&self) -> Option<ContentKind> {
        match self {
            Self::Workout => Some(ContentKind::Routine),
            Self::Nutrition => Some(ContentKind::NutritionPlan),
            Self::Video => Some(ContentKind::Video),
            Self::Document => Some(ContentKind::Document),
            Self::Survey => Some(ContentKind::Survey),
            Self::Evolution => None,
        }
    }
}

impl FromStr for ActivityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            activity_kinds::WORKOUT => Ok(Self::Workout),
            activity_kinds::NUTRITION => Ok(Self::Nutrition),
            activity_kinds::VIDEO => Ok(Self::Video),
            activity_kinds::DOCUMENT => Ok(Self::Document),
            activity_kinds::SURVEY => Ok(Self::Survey),
            activity_kinds::EVOLUTION => Ok(Self::Evolution),
            _ => Err(AppError::invalid_input(format!("Invalid activity kind: {s}")).into()),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved activity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityOrigin {
    /// Scheduled by the resolved program's day assignments
    Program,
    /// Ad-hoc task with no backing program assignment
    Standalone,
}

/// A program-relative position on the schedule grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDay {
    /// 1-based week number within the program
    pub week_number: u32,
    /// Monday-first day index (0 = Monday .. 6 = Sunday)
    pub day_of_week: u8,
}

/// Result of projecting a calendar date onto a program's schedule grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DayProjection {
    /// Selected date precedes the program's start date
    NotStarted,
    /// Selected date falls inside the program
    Day(ProgramDay),
}

impl DayProjection {
    /// Projected day, if the program had started
    #[must_use]
    pub const fn day(&self) -> Option<ProgramDay> {
        match self {
            Self::NotStarted => None,
            Self::Day(day) => Some(*day),
        }
    }
}

/// A user's enrollment in one program source
///
/// Created by an external assignment process; read-only to this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEnrollment {
    /// Unique enrollment identifier
    pub id: String,
    /// Enrolled user
    pub user_id: Uuid,
    /// Which program source this enrollment belongs to
    pub source: ProgramSource,
    /// Program the user is enrolled in
    pub program_id: String,
    /// Enrollment epoch; week/day arithmetic is anchored here
    pub started_at: DateTime<Utc>,
    /// Whether this enrollment is currently active
    pub is_active: bool,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One scheduled slot on a program's static grid
///
/// Immutable from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDayAssignment {
    /// Unique assignment identifier
    pub id: String,
    /// Program this assignment belongs to
    pub program_id: String,
    /// 1-based week number (always 1 for weekly templates)
    pub week_number: u32,
    /// Monday-first day index (0 = Monday .. 6 = Sunday)
    pub day_of_week: u8,
    /// Ordering within the day, ascending
    pub order_in_day: i32,
    /// Activity kind scheduled in this slot
    pub kind: ActivityKind,
    /// Referenced content id; `None` for evolution checkpoints
    pub content_id: Option<String>,
    /// Coach-authored notes for this slot
    pub notes: Option<String>,
}

/// A per-user, per-date task row
///
/// Either an ad-hoc single-date assignment, or the lazily materialized
/// completion record of a program-sourced activity. Created by the completion
/// tracker or an external assignment tool; never deleted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Unique task identifier
    pub id: String,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date the task is due
    pub date: NaiveDate,
    /// Activity kind
    pub kind: ActivityKind,
    /// Referenced content id; `None` for evolution checkpoints
    pub content_id: Option<String>,
    /// Display title captured at assignment time
    pub title: String,
    /// Free-form notes
    pub notes: Option<String>,
    /// Completion flag
    pub is_completed: bool,
    /// When the task was completed, if it was
    pub completed_at: Option<DateTime<Utc>>,
    /// Row creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for the atomic keyed task upsert
///
/// The store generates the row id on first insert; on conflict with the
/// natural key `(user_id, date, kind, content_id)` the existing row is
/// updated in place and keeps its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertScheduledTaskRequest {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date the task is due
    pub date: NaiveDate,
    /// Activity kind
    pub kind: ActivityKind,
    /// Referenced content id; `None` for evolution checkpoints
    pub content_id: Option<String>,
    /// Display title
    pub title: String,
    /// Free-form notes
    pub notes: Option<String>,
    /// Completion flag to set
    pub is_completed: bool,
    /// Completion timestamp to set
    pub completed_at: Option<DateTime<Utc>>,
}

/// Training routine summary from the content library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineSummary {
    /// Routine identifier
    pub id: String,
    /// Routine name
    pub name: String,
    /// Routine type label (strength, mobility, ...)
    pub routine_type: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Estimated session length in minutes
    pub estimated_duration_minutes: Option<i64>,
    /// Number of exercises in the routine
    pub exercise_count: Option<i64>,
}

/// Nutrition plan summary from the content library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPlanSummary {
    /// Plan identifier
    pub id: String,
    /// Plan name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
}

/// Library video summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    /// Video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Platform-specific video identifier
    pub platform_video_id: Option<String>,
    /// Full playback URL
    pub video_url: Option<String>,
}

/// Library document summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document identifier
    pub id: String,
    /// Document title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Download URL
    pub file_url: Option<String>,
    /// Original file name
    pub file_name: Option<String>,
}

/// Library survey summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    /// Survey identifier
    pub id: String,
    /// Survey title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Whether the survey currently accepts responses
    pub is_active: bool,
}

/// A content library record, tagged by kind
///
/// Exhaustive matching at every consumption site; an unhandled kind is a
/// compile-time error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    /// Training routine
    Routine(RoutineSummary),
    /// Nutrition plan
    NutritionPlan(NutritionPlanSummary),
    /// Library video
    Video(VideoSummary),
    /// Library document
    Document(DocumentSummary),
    /// Library survey
    Survey(SurveySummary),
}

impl ContentItem {
    /// Content identifier
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Routine(routine) => &routine.id,
            Self::NutritionPlan(plan) => &plan.id,
            Self::Video(video) => &video.id,
            Self::Document(document) => &document.id,
            Self::Survey(survey) => &survey.id,
        }
    }

    /// Display title
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Routine(routine) => &routine.name,
            Self::NutritionPlan(plan) => &plan.name,
            Self::Video(video) => &video.title,
            Self::Document(document) => &document.title,
            Self::Survey(survey) => &survey.title,
        }
    }

    /// Free-form description, if present
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Routine(routine) => routine.description.as_deref(),
            Self::NutritionPlan(plan) => plan.description.as_deref(),
            Self::Video(video) => video.description.as_deref(),
            Self::Document(document) => document.description.as_deref(),
            Self::Survey(survey) => survey.description.as_deref(),
        }
    }

    /// Which content library this record came from
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Routine(_) => ContentKind::Routine,
            Self::NutritionPlan(_) => ContentKind::NutritionPlan,
            Self::Video(_) => ContentKind::Video,
            Self::Document(_) => ContentKind::Document,
            Self::Survey(_) => ContentKind::Survey,
        }
    }
}

/// Placeholder for a schedule reference whose content record is gone
///
/// Preserved instead of dropped so activity counts stay consistent with the
/// schedule and the UI can show a "not available" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingContent {
    /// The dangling content id the schedule row referenced
    pub content_id: String,
    /// Last known title, if one was captured on a task row
    pub title: Option<String>,
}

/// Content attached to a resolved activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "content", rename_all = "snake_case")]
pub enum ActivityContent {
    /// Content record resolved from the library
    Item(ContentItem),
    /// Referenced content record no longer exists
    Missing(MissingContent),
    /// Evolution checkpoint; carries no library content by construction
    Checkpoint,
}

impl ActivityContent {
    /// Content id this activity references, if any
    #[must_use]
    pub fn content_id(&self) -> Option<&str> {
        match self {
            Self::Item(item) => Some(item.id()),
            Self::Missing(missing) => Some(missing.content_id.as_str()),
            Self::Checkpoint => None,
        }
    }

    /// Display title, if one is known
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Item(item) => Some(item.title()),
            Self::Missing(missing) => missing.title.as_deref(),
            Self::Checkpoint => None,
        }
    }

    /// Whether the referenced content record is gone
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

/// The engine's output unit: one activity due on the resolved day
///
/// Ephemeral; recomputed on every resolution call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedActivity {
    /// Activity kind
    pub kind: ActivityKind,
    /// Joined content, placeholder, or checkpoint marker
    pub content: ActivityContent,
    /// Materialized task row id, once one exists
    pub task_id: Option<String>,
    /// Completion state for the selected date
    pub is_completed: bool,
    /// Program-scheduled or ad-hoc
    pub origin: ActivityOrigin,
    /// Ordering within the day (program slot order, then task order)
    pub order_in_day: i32,
    /// Notes from the assignment or task row
    pub notes: Option<String>,
}

impl ResolvedActivity {
    /// Content id this activity references, if any
    #[must_use]
    pub fn content_id(&self) -> Option<&str> {
        self.content.content_id()
    }
}

/// The resolver's verdict for one user and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProgram {
    /// Authoritative source for the date
    pub source: ScheduleSource,
    /// Matched program id; `None` for the standalone pseudo-source
    pub program_id: Option<String>,
    /// Projected program day; `None` for the standalone pseudo-source
    pub day: Option<ProgramDay>,
}

/// Fully resolved day handed to the calling UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    /// Authoritative source for the date; `None` on a rest day with neither
    /// a program nor ad-hoc tasks
    pub source: Option<ScheduleSource>,
    /// The calendar date this view was resolved for
    pub date: NaiveDate,
    /// Activities due on the date, in display order
    pub activities: Vec<ResolvedActivity>,
    /// Conjunction of completable activity states (nutrition excluded)
    pub day_complete: bool,
}

/// Outcome of a day-view resolution under stale-response fencing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayViewOutcome {
    /// The resolution is current and should be applied
    Fresh(DayView),
    /// A newer resolution was requested while this one ran; discard silently
    Superseded,
}

impl DayViewOutcome {
    /// The resolved view, unless the call was overtaken
    #[must_use]
    pub fn into_view(self) -> Option<DayView> {
        match self {
            Self::Fresh(view) => Some(view),
            Self::Superseded => None,
        }
    }
}

/// Broadcast payload published after a successful completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// User who completed the activity
    pub user_id: Uuid,
    /// Date the activity was due
    pub date: NaiveDate,
    /// Activity kind
    pub kind: ActivityKind,
    /// Referenced content id, if any
    pub content_id: Option<String>,
    /// The materialized task row id
    pub task_id: String,
}

/// A logged training session
///
/// Source of truth for workout completion; workouts are never completed via
/// task flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLog {
    /// Unique log identifier
    pub id: String,
    /// User who trained
    pub user_id: Uuid,
    /// Routine that was performed
    pub routine_id: String,
    /// When the session was logged
    pub workout_date: DateTime<Utc>,
    /// Session length in minutes
    pub duration_minutes: Option<i64>,
    /// Free-form notes
    pub notes: Option<String>,
}
