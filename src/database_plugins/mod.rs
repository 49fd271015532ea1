// ABOUTME: Database abstraction layer for the Gatofit schedule engine
// ABOUTME: Plugin architecture so engine components stay backend-agnostic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Database Plugins
//!
//! The repository boundary the engine components are written against. The
//! resolver, aggregator, and completion tracker only ever see
//! [`DatabaseProvider`]; the concrete backend is selected at runtime by the
//! [`factory::Database`] wrapper.

use crate::errors::SurveySubmissionError;
use crate::models::{
    ActivityKind, ContentItem, ContentKind, DocumentSummary, NutritionPlanSummary,
    ProgramDayAssignment, ProgramEnrollment, ProgramSource, RoutineSummary, ScheduledTask,
    SurveySummary, UpsertScheduledTaskRequest, VideoSummary, WorkoutLog,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

pub mod factory;
pub mod sqlite;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the engine layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Create a new database connection
    async fn new(database_url: &str) -> Result<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> Result<()>;

    // ================================
    // Enrollments and program schedule
    // ================================

    /// Create a program enrollment
    async fn create_program_enrollment(&self, enrollment: &ProgramEnrollment) -> Result<()>;

    /// Get the user's active enrollment for one program source
    async fn get_active_enrollment(
        &self,
        user_id: Uuid,
        source: ProgramSource,
    ) -> Result<Option<ProgramEnrollment>>;

    /// Deactivate the user's enrollments for one program source
    async fn deactivate_enrollments(&self, user_id: Uuid, source: ProgramSource) -> Result<()>;

    /// Create one schedule-grid assignment
    async fn create_program_day_assignment(&self, assignment: &ProgramDayAssignment)
        -> Result<()>;

    /// Get one kind's assignments for a program slot, ordered within the day
    async fn get_program_day_assignments(
        &self,
        program_id: &str,
        week_number: u32,
        day_of_week: u8,
        kind: ActivityKind,
    ) -> Result<Vec<ProgramDayAssignment>>;

    // ================================
    // Content libraries
    // ================================

    /// Batch-resolve content records by id for one library kind
    async fn get_content_by_ids(&self, kind: ContentKind, ids: &[String])
        -> Result<Vec<ContentItem>>;

    /// Create a routine record
    async fn create_routine(&self, routine: &RoutineSummary) -> Result<()>;

    /// Create a nutrition plan record
    async fn create_nutrition_plan(&self, plan: &NutritionPlanSummary) -> Result<()>;

    /// Create a library video record
    async fn create_library_video(&self, video: &VideoSummary) -> Result<()>;

    /// Create a library document record
    async fn create_library_document(&self, document: &DocumentSummary) -> Result<()>;

    /// Create a library survey record
    async fn create_library_survey(&self, survey: &SurveySummary) -> Result<()>;

    /// Delete a routine record
    async fn delete_routine(&self, routine_id: &str) -> Result<()>;

    /// Delete a library video record
    async fn delete_library_video(&self, video_id: &str) -> Result<()>;

    // ================================
    // Scheduled tasks
    // ================================

    /// Get all of the user's task rows for one calendar date
    async fn get_scheduled_tasks(&self, user_id: Uuid, date: NaiveDate)
        -> Result<Vec<ScheduledTask>>;

    /// Atomically insert or update a task row keyed by its natural key
    async fn upsert_scheduled_task(
        &self,
        request: &UpsertScheduledTaskRequest,
    ) -> Result<ScheduledTask>;

    /// Get a task row by its natural key
    async fn get_task_by_natural_key(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        kind: ActivityKind,
        content_id: Option<&str>,
    ) -> Result<Option<ScheduledTask>>;

    // ================================
    // Workout logs
    // ================================

    /// Record a logged training session
    async fn create_workout_log(&self, log: &WorkoutLog) -> Result<()>;

    /// Routine ids the user logged a session for on one calendar date
    async fn get_workout_routine_ids_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>>;

    // ================================
    // Survey responses
    // ================================

    /// Insert the user's response to a survey
    async fn submit_survey_response(
        &self,
        survey_id: &str,
        user_id: Uuid,
        answers: &Value,
    ) -> Result<(), SurveySubmissionError>;

    /// Whether the user has already answered a survey
    async fn has_survey_response(&self, survey_id: &str, user_id: Uuid) -> Result<bool>;
}
