// ABOUTME: Merges per-date ad-hoc task rows into the aggregated program activities
// ABOUTME: Two-way keyed merge so a materialized task is recognized, not duplicated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Scheduled Overlay
//!
//! Program-sourced activities only gain a task row once the user completes
//! them, so on repeat visits the same logical activity must be recognized as
//! the same one. The overlay keys program activities by `(kind, content id)`:
//! a task matching an existing activity attaches its completion record to it,
//! and everything else appends as a standalone activity with content joined
//! from the libraries.

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActivityContent, ActivityKind, ActivityOrigin, ContentItem, ContentKind, MissingContent,
    ResolvedActivity, ScheduledTask,
};
use chrono::NaiveDate;
use futures_util::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Merges ad-hoc task rows into a day's program activities
pub struct ScheduledOverlay<DB: DatabaseProvider> {
    database: Arc<DB>,
}

/// Merge key: activity kind plus content id, with absent ids folded to the
/// empty string (matches the store's natural-key treatment of NULL)
fn merge_key(kind: ActivityKind, content_id: Option<&str>) -> (ActivityKind, String) {
    (kind, content_id.unwrap_or_default().to_owned())
}

/// Attach matching task rows to program activities in place
///
/// Returns the updated activities and the tasks that matched nothing; those
/// leftovers are the day's true standalone assignments.
#[must_use]
pub fn attach_tasks(
    program_activities: Vec<ResolvedActivity>,
    tasks: Vec<ScheduledTask>,
) -> (Vec<ResolvedActivity>, Vec<ScheduledTask>) {
    let mut activities = program_activities;

    let mut positions: HashMap<(ActivityKind, String), usize> = HashMap::new();
    for (position, activity) in activities.iter().enumerate() {
        positions
            .entry(merge_key(activity.kind, activity.content_id()))
            .or_insert(position);
    }

    let mut leftover = Vec::new();
    for task in tasks {
        match positions.get(&merge_key(task.kind, task.content_id.as_deref())) {
            Some(&position) => {
                // The task is the materialized completion record for this
                // program activity
                let activity = &mut activities[position];
                activity.task_id = Some(task.id);
                activity.is_completed = task.is_completed;
            }
            None => leftover.push(task),
        }
    }

    (activities, leftover)
}

impl<DB: DatabaseProvider> ScheduledOverlay<DB> {
    /// Create a new overlay over the given database
    #[must_use]
    pub const fn new(database: Arc<DB>) -> Self {
        Self { database }
    }

    /// Fetch the user's task rows for the date and merge them in
    ///
    /// Program order is preserved; standalone items follow in task order.
    ///
    /// # Errors
    ///
    /// Returns a store error if the task fetch or any content join fails
    pub async fn merge(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        program_activities: Vec<ResolvedActivity>,
    ) -> AppResult<Vec<ResolvedActivity>> {
        let tasks = self
            .database
            .get_scheduled_tasks(user_id, date)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to load scheduled tasks for user {user_id} on {date}: {e}"
                ))
            })?;

        let (mut activities, leftover) = attach_tasks(program_activities, tasks);

        let standalone = self
            .resolve_standalone_tasks(leftover, activities.len())
            .await?;
        activities.extend(standalone);

        Ok(activities)
    }

    /// Join content onto unmatched task rows, in task order
    async fn resolve_standalone_tasks(
        &self,
        tasks: Vec<ScheduledTask>,
        start_order: usize,
    ) -> AppResult<Vec<ResolvedActivity>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids_by_kind: HashMap<ContentKind, Vec<String>> = HashMap::new();
        for task in &tasks {
            if let (Some(content_kind), Some(content_id)) =
                (task.kind.content_kind(), task.content_id.as_ref())
            {
                ids_by_kind
                    .entry(content_kind)
                    .or_default()
                    .push(content_id.clone());
            }
        }

        let fetches = ids_by_kind.into_iter().map(|(content_kind, ids)| {
            let database = Arc::clone(&self.database);
            async move {
                let items = database
                    .get_content_by_ids(content_kind, &ids)
                    .await
                    .map_err(|e| {
                        AppError::database(format!(
                            "Failed to load {} content for standalone tasks: {e}",
                            content_kind.as_str()
                        ))
                    })?;
                Ok::<_, AppError>(items)
            }
        });

        let mut content: HashMap<(ContentKind, String), ContentItem> = HashMap::new();
        for items in try_join_all(fetches).await? {
            for item in items {
                content.insert((item.kind(), item.id().to_owned()), item);
            }
        }

        Ok(tasks
            .into_iter()
            .enumerate()
            .map(|(offset, task)| {
                let order = i32::try_from(start_order + offset).unwrap_or(i32::MAX);
                Self::to_standalone_activity(task, &content, order)
            })
            .collect())
    }

    /// Build the resolved activity for one unmatched task row
    fn to_standalone_activity(
        task: ScheduledTask,
        content: &HashMap<(ContentKind, String), ContentItem>,
        order_in_day: i32,
    ) -> ResolvedActivity {
        let resolved_content = match (task.kind.content_kind(), task.content_id.as_ref()) {
            (None, _) => ActivityContent::Checkpoint,
            (Some(content_kind), Some(content_id)) => content
                .get(&(content_kind, content_id.clone()))
                .map_or_else(
                    || {
                        // Dangling reference: keep the item visible as a
                        // placeholder instead of dropping it from the day
                        warn!(
                            task_id = %task.id,
                            kind = %task.kind,
                            content_id = %content_id,
                            "Standalone task references deleted content"
                        );
                        ActivityContent::Missing(MissingContent {
                            content_id: content_id.clone(),
                            title: Some(task.title.clone()),
                        })
                    },
                    |item| ActivityContent::Item(item.clone()),
                ),
            (Some(_), None) => {
                warn!(task_id = %task.id, kind = %task.kind, "Standalone task has no content id");
                ActivityContent::Missing(MissingContent {
                    content_id: String::new(),
                    title: Some(task.title.clone()),
                })
            }
        };

        ResolvedActivity {
            kind: task.kind,
            content: resolved_content,
            task_id: Some(task.id),
            is_completed: task.is_completed,
            origin: ActivityOrigin::Standalone,
            order_in_day,
            notes: task.notes,
        }
    }
}
