// ABOUTME: Facade service composing resolver, aggregator, overlay, and tracker
// ABOUTME: Bounds each resolution with a timeout and fences stale responses by generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Day View Service
//!
//! One call turns a user id and calendar date into the fully resolved day:
//! source precedence, program-day aggregation, ad-hoc task merge, workout-log
//! annotation, and the day-completion rollup.
//!
//! The service instance is scoped to one viewer (a screen or session). Rapid
//! date switching makes responses race, so every `day_view` call claims the
//! next generation from a per-service counter at call time; when a finished
//! resolution is no longer the newest claim it reports [`DayViewOutcome::Superseded`]
//! instead of handing back a stale view.

use crate::config::EngineConfig;
use crate::context::{DataContext, NotificationContext};
use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::engine::aggregator::ActivityAggregator;
use crate::engine::completion::{annotate_workouts, CompletionTracker};
use crate::engine::overlay::ScheduledOverlay;
use crate::engine::resolver::ProgramResolver;
use crate::engine::rollup;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{CompletionEvent, DayView, DayViewOutcome, ResolvedActivity};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Monotonic counter fencing a service's in-flight resolutions
///
/// A claim is taken when the call is created, not when it is first polled,
/// so ordering follows call order even under a single-threaded executor.
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
    /// Create a counter with no claims taken
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Claim the next generation
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given claim is still the newest one
    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// Facade for day resolution and completion over one database backend
pub struct DayViewService<DB: DatabaseProvider> {
    database: Arc<DB>,
    resolver: ProgramResolver<DB>,
    aggregator: ActivityAggregator<DB>,
    overlay: ScheduledOverlay<DB>,
    tracker: CompletionTracker<DB>,
    notification: NotificationContext,
    config: EngineConfig,
    generation: RequestGeneration,
}

impl<DB: DatabaseProvider> DayViewService<DB> {
    /// Create a service over the given database and notification channel
    #[must_use]
    pub fn new(database: Arc<DB>, notification: NotificationContext, config: EngineConfig) -> Self {
        Self {
            resolver: ProgramResolver::new(Arc::clone(&database)),
            aggregator: ActivityAggregator::new(Arc::clone(&database)),
            overlay: ScheduledOverlay::new(Arc::clone(&database)),
            tracker: CompletionTracker::new(Arc::clone(&database)),
            database,
            notification,
            config,
            generation: RequestGeneration::new(),
        }
    }

    /// Notification channel for completion events
    #[must_use]
    pub const fn notification(&self) -> &NotificationContext {
        &self.notification
    }

    /// Resolve the full day view for a user and date
    ///
    /// The generation claim happens when the call is made; the returned
    /// future runs the pipeline under the configured timeout and reports
    /// [`DayViewOutcome::Superseded`] when a newer call has been made in the
    /// meantime. Dropping the future cancels any in-flight fetches.
    ///
    /// # Errors
    ///
    /// Returns `STORE_TIMEOUT` when resolution exceeds the configured bound,
    /// and a store error when any fetch in the pipeline fails.
    pub fn day_view(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = AppResult<DayViewOutcome>> + Send + '_ {
        let generation = self.generation.begin();
        async move {
            let view = tokio::time::timeout(
                self.config.resolution_timeout(),
                self.resolve_day(user_id, date),
            )
            .await
            .map_err(|_| {
                AppError::timeout(format!(
                    "Day resolution for {date} exceeded {}s",
                    self.config.resolution_timeout_secs
                ))
                .with_user_id(user_id)
            })??;

            if self.generation.is_current(generation) {
                Ok(DayViewOutcome::Fresh(view))
            } else {
                debug!(
                    user_id = %user_id,
                    date = %date,
                    generation,
                    "Resolution overtaken by a newer request, discarding"
                );
                Ok(DayViewOutcome::Superseded)
            }
        }
    }

    /// Mark one activity complete and publish the completion event
    ///
    /// # Errors
    ///
    /// See [`CompletionTracker::mark_complete`].
    pub async fn complete_activity(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        activity: &ResolvedActivity,
    ) -> AppResult<ResolvedActivity> {
        let updated = self.tracker.mark_complete(user_id, date, activity).await?;
        self.publish_completion(user_id, date, &updated);
        Ok(updated)
    }

    /// Record survey answers, mark the activity complete, publish the event
    ///
    /// # Errors
    ///
    /// See [`CompletionTracker::submit_survey`].
    pub async fn submit_survey(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        activity: &ResolvedActivity,
        answers: &serde_json::Value,
    ) -> AppResult<ResolvedActivity> {
        let updated = self
            .tracker
            .submit_survey(user_id, date, activity, answers)
            .await?;
        self.publish_completion(user_id, date, &updated);
        Ok(updated)
    }

    /// Run the resolution pipeline without fencing or timeout
    async fn resolve_day(&self, user_id: Uuid, date: NaiveDate) -> AppResult<DayView> {
        let started = Instant::now();

        let Some(program) = self.resolver.resolve(user_id, date).await? else {
            debug!(user_id = %user_id, date = %date, "No schedule for date, rest day");
            return Ok(DayView {
                source: None,
                date,
                activities: Vec::new(),
                day_complete: true,
            });
        };

        let program_activities = match (program.program_id.as_deref(), program.day) {
            (Some(program_id), Some(day)) => self.aggregator.aggregate(program_id, day).await?,
            _ => Vec::new(),
        };

        let mut activities = self.overlay.merge(user_id, date, program_activities).await?;

        let logged_routines = self
            .database
            .get_workout_routine_ids_for_date(user_id, date)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to load workout logs for {date}: {e}"))
                    .with_user_id(user_id)
            })?;
        annotate_workouts(&mut activities, &logged_routines);

        let day_complete = rollup::day_complete(&activities);

        AppLogger::log_resolution(
            &user_id.to_string(),
            &date.to_string(),
            program.source.as_str(),
            activities.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok(DayView {
            source: Some(program.source),
            date,
            activities,
            day_complete,
        })
    }

    /// Fire-and-forget completion event publication
    fn publish_completion(&self, user_id: Uuid, date: NaiveDate, activity: &ResolvedActivity) {
        if let Some(task_id) = activity.task_id.clone() {
            self.notification.publish(CompletionEvent {
                user_id,
                date,
                kind: activity.kind,
                content_id: activity.content_id().map(ToOwned::to_owned),
                task_id,
            });
        }
    }
}

impl DayViewService<Database> {
    /// Wire a service from the injected contexts
    #[must_use]
    pub fn from_context(
        data: &DataContext,
        notification: NotificationContext,
        config: EngineConfig,
    ) -> Self {
        Self::new(Arc::clone(data.database()), notification, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_claims_are_monotonic() {
        let generation = RequestGeneration::new();
        assert_eq!(generation.begin(), 1);
        assert_eq!(generation.begin(), 2);
        assert_eq!(generation.begin(), 3);
    }

    #[test]
    fn test_only_newest_claim_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_fresh_counter_has_no_begun_claim() {
        let generation = RequestGeneration::new();
        assert!(!generation.is_current(1));
    }
}
