// ABOUTME: Program source resolution under strict Admin > Gatofit > Weekly precedence
// ABOUTME: First matching source wins and later sources are never queried
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Program Resolver
//!
//! Determines which single program source is authoritative for a user and
//! date. Precedence is strict and total: a user enrolled in both a coach
//! program and a weekly template only ever sees the coach program. When no
//! program matches, ad-hoc task rows for the date synthesize a standalone
//! pseudo-source so the day still renders.

use crate::calendar;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    DayProjection, ProgramDay, ProgramSource, ResolvedProgram, ScheduleSource,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Epoch-anchored sources checked before the weekly template, in precedence
/// order
const EPOCH_SOURCES: [ProgramSource; 2] = [ProgramSource::Admin, ProgramSource::Gatofit];

/// Resolves the authoritative program source for a user and date
pub struct ProgramResolver<DB: DatabaseProvider> {
    database: Arc<DB>,
}

impl<DB: DatabaseProvider> ProgramResolver<DB> {
    /// Create a new resolver over the given database
    #[must_use]
    pub const fn new(database: Arc<DB>) -> Self {
        Self { database }
    }

    /// Resolve the authoritative source for one user and calendar date
    ///
    /// Evaluation order is Admin, Gatofit, Weekly, then the standalone
    /// pseudo-source; the first match wins and short-circuits. Admin and
    /// Gatofit match only when an active enrollment exists and the date is
    /// not before its start (date-only comparison); a matched source is
    /// authoritative even when the projected day has zero assignments, so
    /// the program stays browsable across all dates. Weekly has no start
    /// gate and projects its day slot straight from the calendar weekday.
    ///
    /// # Errors
    ///
    /// Returns a store error if any enrollment or task query fails
    pub async fn resolve(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<ResolvedProgram>> {
        for source in EPOCH_SOURCES {
            if let Some(resolved) = self.resolve_epoch_source(user_id, date, source).await? {
                return Ok(Some(resolved));
            }
        }

        if let Some(resolved) = self.resolve_weekly(user_id, date).await? {
            return Ok(Some(resolved));
        }

        self.resolve_standalone(user_id, date).await
    }

    /// Check one epoch-anchored source (admin or gatofit)
    async fn resolve_epoch_source(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        source: ProgramSource,
    ) -> AppResult<Option<ResolvedProgram>> {
        let enrollment = self
            .database
            .get_active_enrollment(user_id, source)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to load active {source} enrollment for user {user_id}: {e}"
                ))
            })?;

        let Some(enrollment) = enrollment else {
            debug!(user_id = %user_id, source = %source, "No active enrollment");
            return Ok(None);
        };

        // Time-of-day is stripped on both sides so a program starting later
        // today still counts as started
        match calendar::project(enrollment.started_at.date_naive(), date) {
            DayProjection::NotStarted => {
                debug!(
                    user_id = %user_id,
                    source = %source,
                    program_id = %enrollment.program_id,
                    "Enrollment not yet started for selected date"
                );
                Ok(None)
            }
            DayProjection::Day(day) => {
                debug!(
                    user_id = %user_id,
                    source = %source,
                    program_id = %enrollment.program_id,
                    week = day.week_number,
                    day = day.day_of_week,
                    "Resolved program source"
                );
                Ok(Some(ResolvedProgram {
                    source: source.into(),
                    program_id: Some(enrollment.program_id),
                    day: Some(day),
                }))
            }
        }
    }

    /// Check the weekly template source
    async fn resolve_weekly(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<ResolvedProgram>> {
        let enrollment = self
            .database
            .get_active_enrollment(user_id, ProgramSource::Weekly)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to load weekly enrollment for user {user_id}: {e}"
                ))
            })?;

        Ok(enrollment.map(|enrollment| {
            // Templates repeat indefinitely; the slot is the calendar weekday
            // and schedule rows are authored with week_number 1
            let day = ProgramDay {
                week_number: 1,
                day_of_week: calendar::weekday_index(date),
            };
            debug!(
                user_id = %user_id,
                program_id = %enrollment.program_id,
                day = day.day_of_week,
                "Resolved weekly template"
            );
            ResolvedProgram {
                source: ScheduleSource::Weekly,
                program_id: Some(enrollment.program_id),
                day: Some(day),
            }
        }))
    }

    /// Synthesize the standalone pseudo-source when ad-hoc tasks exist
    async fn resolve_standalone(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<ResolvedProgram>> {
        let tasks = self
            .database
            .get_scheduled_tasks(user_id, date)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to load scheduled tasks for user {user_id} on {date}: {e}"
                ))
            })?;

        if tasks.is_empty() {
            debug!(user_id = %user_id, date = %date, "No program and no tasks for date");
            return Ok(None);
        }

        debug!(
            user_id = %user_id,
            date = %date,
            task_count = tasks.len(),
            "Synthesized standalone pseudo-source"
        );
        Ok(Some(ResolvedProgram {
            source: ScheduleSource::Standalone,
            program_id: None,
            day: None,
        }))
    }
}
