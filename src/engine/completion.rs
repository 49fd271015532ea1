// ABOUTME: Completion tracking for day activities with lazy task materialization
// ABOUTME: Guards against double-submission and routes each kind to its completion path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Completion Tracker
//!
//! Program activities have no per-user rows until the user acts on one. The
//! tracker materializes a task row at completion time with an atomic upsert,
//! so a retried or double-tapped completion converges on a single row rather
//! than failing or duplicating.
//!
//! Not every kind completes here: workouts derive completion from workout
//! logs, nutrition has no per-day completion at all, and program evolution
//! checkpoints complete through the measurement flow.

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult, SurveySubmissionError};
use crate::models::{ActivityKind, ActivityOrigin, ResolvedActivity, UpsertScheduledTaskRequest};
use chrono::{NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Key identifying one logical completion slot while a write is in flight
type InFlightKey = (Uuid, NaiveDate, ActivityKind, String);

/// Records activity completions, creating task rows on demand
pub struct CompletionTracker<DB: DatabaseProvider> {
    database: Arc<DB>,
    in_flight: DashMap<InFlightKey, ()>,
}

/// Mark workout activities complete when a matching workout log exists
///
/// Logged completion wins over the task row state but never un-completes an
/// activity a task row already marked done.
pub fn annotate_workouts(activities: &mut [ResolvedActivity], logged_routine_ids: &[String]) {
    for activity in activities
        .iter_mut()
        .filter(|activity| activity.kind == ActivityKind::Workout)
    {
        if let Some(routine_id) = activity.content_id() {
            if logged_routine_ids.iter().any(|logged| logged == routine_id) {
                activity.is_completed = true;
            }
        }
    }
}

impl<DB: DatabaseProvider> CompletionTracker<DB> {
    /// Create a new tracker over the given database
    #[must_use]
    pub fn new(database: Arc<DB>) -> Self {
        Self {
            database,
            in_flight: DashMap::new(),
        }
    }

    /// Mark one activity complete for the given date
    ///
    /// Materializes the task row if the activity has none yet. Returns the
    /// activity updated with its task id and completion state.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for kinds that do not complete through this
    /// path, `OPERATION_IN_PROGRESS` when the same slot is already being
    /// written, and a store error if the upsert fails.
    pub async fn mark_complete(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        activity: &ResolvedActivity,
    ) -> AppResult<ResolvedActivity> {
        Self::check_completable(activity)?;

        let key = Self::in_flight_key(user_id, date, activity);
        match self.in_flight.entry(key.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::in_progress(format!(
                    "Completion already in progress for {} activity on {date}",
                    activity.kind
                ))
                .with_user_id(user_id));
            }
            Entry::Vacant(slot) => {
                slot.insert(());
            }
        }

        let result = self.persist_completion(user_id, date, activity).await;
        self.in_flight.remove(&key);
        result
    }

    /// Record survey answers and mark the survey activity complete
    ///
    /// A repeat submission for the same survey is treated as idempotent: the
    /// stored response is kept and the completion still goes through.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when the activity is not a survey or carries
    /// no survey id, and a store error if persistence fails.
    pub async fn submit_survey(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        activity: &ResolvedActivity,
        answers: &serde_json::Value,
    ) -> AppResult<ResolvedActivity> {
        if activity.kind != ActivityKind::Survey {
            return Err(AppError::invalid_input(format!(
                "Survey submission received a {} activity",
                activity.kind
            )));
        }
        let survey_id = activity.content_id().ok_or_else(|| {
            AppError::invalid_input("Survey activity has no survey id to submit against")
        })?;

        match self
            .database
            .submit_survey_response(survey_id, user_id, answers)
            .await
        {
            Ok(()) => {
                debug!(user_id = %user_id, survey_id = %survey_id, "Survey response stored");
            }
            Err(SurveySubmissionError::Duplicate { survey_id }) => {
                info!(
                    user_id = %user_id,
                    survey_id = %survey_id,
                    "Survey response already recorded, keeping original answers"
                );
            }
            Err(SurveySubmissionError::Store(e)) => {
                return Err(AppError::database(format!(
                    "Failed to store survey response for {survey_id}: {e}"
                ))
                .with_user_id(user_id));
            }
        }

        self.mark_complete(user_id, date, activity).await
    }

    /// Reject kinds whose completion lives elsewhere
    fn check_completable(activity: &ResolvedActivity) -> AppResult<()> {
        match activity.kind {
            ActivityKind::Workout => Err(AppError::invalid_input(
                "Workout activities complete through workout logs, not manual completion",
            )),
            ActivityKind::Nutrition => Err(AppError::invalid_input(
                "Nutrition activities do not track per-day completion",
            )),
            ActivityKind::Evolution if activity.origin == ActivityOrigin::Program => {
                Err(AppError::invalid_input(
                    "Program evolution checkpoints complete through the measurement flow",
                ))
            }
            _ => Ok(()),
        }
    }

    fn in_flight_key(user_id: Uuid, date: NaiveDate, activity: &ResolvedActivity) -> InFlightKey {
        (
            user_id,
            date,
            activity.kind,
            activity.content_id().unwrap_or_default().to_owned(),
        )
    }

    async fn persist_completion(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        activity: &ResolvedActivity,
    ) -> AppResult<ResolvedActivity> {
        let request = UpsertScheduledTaskRequest {
            user_id,
            date,
            kind: activity.kind,
            content_id: activity.content_id().map(ToOwned::to_owned),
            title: activity.content.title().unwrap_or_default().to_owned(),
            notes: activity.notes.clone(),
            is_completed: true,
            completed_at: Some(Utc::now()),
        };

        let task = self
            .database
            .upsert_scheduled_task(&request)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to record completion for {} activity on {date}: {e}",
                    activity.kind
                ))
                .with_user_id(user_id)
            })?;

        let mut updated = activity.clone();
        updated.task_id = Some(task.id);
        updated.is_completed = task.is_completed;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_checkpoint_activity, create_program_activity};

    fn workout(routine_id: &str) -> ResolvedActivity {
        create_program_activity(ActivityKind::Workout, routine_id, "Push day")
    }

    #[test]
    fn test_annotate_workouts_marks_logged_routines() {
        let mut activities = vec![workout("routine-1"), workout("routine-2")];
        annotate_workouts(&mut activities, &["routine-2".to_owned()]);

        assert!(!activities[0].is_completed);
        assert!(activities[1].is_completed);
    }

    #[test]
    fn test_annotate_workouts_never_clears_completion() {
        let mut activities = vec![workout("routine-1")];
        activities[0].is_completed = true;

        annotate_workouts(&mut activities, &[]);

        assert!(activities[0].is_completed);
    }

    #[test]
    fn test_annotate_workouts_ignores_other_kinds() {
        let mut activities = vec![create_checkpoint_activity(ActivityOrigin::Program)];

        annotate_workouts(&mut activities, &["routine-1".to_owned()]);

        assert!(!activities[0].is_completed);
    }
}
