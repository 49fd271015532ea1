// ABOUTME: SQLite implementation of the DatabaseProvider trait
// ABOUTME: Thin delegation onto the inner database module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! SQLite database implementation
//!
//! Wraps the inner SQLite database functionality to implement the
//! `DatabaseProvider` trait.

use super::DatabaseProvider;
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

/// SQLite database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    /// The underlying database instance
    inner: crate::database::Database,
}

impl SqliteDatabase {
    /// Get a reference to the inner database for advanced operations
    #[must_use]
    pub const fn inner(&self) -> &crate::database::Database {
        &self.inner
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> Result<Self> {
        let inner = crate::database::Database::new(database_url).await?;
        Ok(Self { inner })
    }

    async fn migrate(&self) -> Result<()> {
        self.inner.migrate().await
    }

    async fn create_program_enrollment(&self, enrollment: &ProgramEnrollment) -> Result<()> {
        self.inner.create_program_enrollment(enrollment).await
    }

    async fn get_active_enrollment(
        &self,
        user_id: Uuid,
        source: ProgramSource,
    ) -> Result<Option<ProgramEnrollment>> {
        self.inner.get_active_enrollment(user_id, source).await
    }

    async fn deactivate_enrollments(&self, user_id: Uuid, source: ProgramSource) -> Result<()> {
        self.inner.deactivate_enrollments(user_id, source).await
    }

    async fn create_program_day_assignment(
        &self,
        assignment: &ProgramDayAssignment,
    ) -> Result<()> {
        self.inner.create_program_day_assignment(assignment).await
    }

    async fn get_program_day_assignments(
        &self,
        program_id: &str,
        week_number: u32,
        day_of_week: u8,
        kind: ActivityKind,
    ) -> Result<Vec<ProgramDayAssignment>> {
        self.inner
            .get_program_day_assignments(program_id, week_number, day_of_week, kind)
            .await
    }

    async fn get_content_by_ids(
        &self,
        kind: ContentKind,
        ids: &[String],
    ) -> Result<Vec<ContentItem>> {
        self.inner.get_content_by_ids(kind, ids).await
    }

    async fn create_routine(&self, routine: &RoutineSummary) -> Result<()> {
        self.inner.create_routine(routine).await
    }

    async fn create_nutrition_plan(&self, plan: &NutritionPlanSummary) -> Result<()> {
        self.inner.create_nutrition_plan(plan).await
    }

    async fn create_library_video(&self, video: &VideoSummary) -> Result<()> {
        self.inner.create_library_video(video).await
    }

    async fn create_library_document(&self, document: &DocumentSummary) -> Result<()> {
        self.inner.create_library_document(document).await
    }

    async fn create_library_survey(&self, survey: &SurveySummary) -> Result<()> {
        self.inner.create_library_survey(survey).await
    }

    async fn delete_routine(&self, routine_id: &str) -> Result<()> {
        self.inner.delete_routine(routine_id).await
    }

    async fn delete_library_video(&self, video_id: &str) -> Result<()> {
        self.inner.delete_library_video(video_id).await
    }

    async fn get_scheduled_tasks(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduledTask>> {
        self.inner.get_scheduled_tasks(user_id, date).await
    }

    async fn upsert_scheduled_task(
        &self,
        request: &UpsertScheduledTaskRequest,
    ) -> Result<ScheduledTask> {
        self.inner.upsert_scheduled_task(request).await
    }

    async fn get_task_by_natural_key(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        kind: ActivityKind,
        content_id: Option<&str>,
    ) -> Result<Option<ScheduledTask>> {
        self.inner
            .get_task_by_natural_key(user_id, date, kind, content_id)
            .await
    }

    async fn create_workout_log(&self, log: &WorkoutLog) -> Result<()> {
        self.inner.create_workout_log(log).await
    }

    async fn get_workout_routine_ids_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>> {
        self.inner
            .get_workout_routine_ids_for_date(user_id, date)
            .await
    }

    async fn submit_survey_response(
        &self,
        survey_id: &str,
        user_id: Uuid,
        answers: &Value,
    ) -> Result<(), SurveySubmissionError> {
        self.inner
            .submit_survey_response(survey_id, user_id, answers)
            .await
    }

    async fn has_survey_response(&self, survey_id: &str, user_id: Uuid) -> Result<bool> {
        self.inner.has_survey_response(survey_id, user_id).await
    }
}
