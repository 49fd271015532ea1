// ABOUTME: Concurrent per-kind aggregation of a program day's activities
// ABOUTME: Joins schedule rows with library content, degrading dangling refs to placeholders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Activity Aggregator
//!
//! Fetches one program day's assignments across all six activity kinds and
//! joins content details. The six per-kind fetches are independent reads and
//! run concurrently; the join waits on all of them, and any store failure
//! fails the whole aggregation so callers never see a partial activity set.
//! A dangling content reference degrades to a placeholder instead of
//! dropping the activity, keeping counts consistent for the completion
//! rollup.

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActivityContent, ActivityKind, ActivityOrigin, MissingContent, ProgramDay,
    ProgramDayAssignment, ResolvedActivity,
};
use futures_util::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Aggregates one program day's activities across all kinds
pub struct ActivityAggregator<DB: DatabaseProvider> {
    database: Arc<DB>,
}

impl<DB: DatabaseProvider> ActivityAggregator<DB> {
    /// Create a new aggregator over the given database
    #[must_use]
    pub const fn new(database: Arc<DB>) -> Self {
        Self { database }
    }

    /// Aggregate all activities scheduled for one program day
    ///
    /// Activities are grouped by kind in a fixed order, each group sorted by
    /// its in-day position. Completion state is not yet known here; every
    /// activity comes back incomplete with no task attached.
    ///
    /// # Errors
    ///
    /// Returns a store error if any per-kind fetch fails; no partial set is
    /// ever returned
    pub async fn aggregate(
        &self,
        program_id: &str,
        day: ProgramDay,
    ) -> AppResult<Vec<ResolvedActivity>> {
        let per_kind = try_join_all(
            ActivityKind::ALL
                .iter()
                .map(|kind| self.aggregate_kind(program_id, day, *kind)),
        )
        .await?;

        Ok(per_kind.into_iter().flatten().collect())
    }

    /// Fetch and join one kind's assignments for the day
    async fn aggregate_kind(
        &self,
        program_id: &str,
        day: ProgramDay,
        kind: ActivityKind,
    ) -> AppResult<Vec<ResolvedActivity>> {
        let assignments = self
            .database
            .get_program_day_assignments(program_id, day.week_number, day.day_of_week, kind)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to load {kind} assignments for program {program_id} \
                     week {} day {}: {e}",
                    day.week_number, day.day_of_week
                ))
            })?;

        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let Some(content_kind) = kind.content_kind() else {
            // Evolution checkpoints carry no library content; the schedule
            // row itself is the whole payload
            return Ok(assignments
                .iter()
                .map(|assignment| Self::to_activity(assignment, ActivityContent::Checkpoint))
                .collect());
        };

        let ids: Vec<String> = assignments
            .iter()
            .filter_map(|assignment| assignment.content_id.clone())
            .collect();

        let items = self
            .database
            .get_content_by_ids(content_kind, &ids)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to load {} content for program {program_id}: {e}",
                    content_kind.as_str()
                ))
            })?;

        let by_id: HashMap<&str, usize> = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id(), index))
            .collect();

        Ok(assignments
            .iter()
            .map(|assignment| {
                let content_id = assignment.content_id.clone().unwrap_or_default();
                let content = by_id.get(content_id.as_str()).map_or_else(
                    || {
                        warn!(
                            program_id = %program_id,
                            kind = %kind,
                            content_id = %content_id,
                            "Scheduled content no longer exists, emitting placeholder"
                        );
                        ActivityContent::Missing(MissingContent {
                            content_id: content_id.clone(),
                            title: None,
                        })
                    },
                    |index| ActivityContent::Item(items[*index].clone()),
                );
                Self::to_activity(assignment, content)
            })
            .collect())
    }

    /// Build the resolved activity for one schedule row
    fn to_activity(
        assignment: &ProgramDayAssignment,
        content: ActivityContent,
    ) -> ResolvedActivity {
        ResolvedActivity {
            kind: assignment.kind,
            content,
            task_id: None,
            is_completed: false,
            origin: ActivityOrigin::Program,
            order_in_day: assignment.order_in_day,
            notes: assignment.notes.clone(),
        }
    }
}
