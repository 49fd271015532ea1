// ABOUTME: Scheduled-task database operations with an atomic keyed upsert
// ABOUTME: One row per (user, date, kind, content) enforced by a unique index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use super::Database;
use crate::models::{ActivityKind, ScheduledTask, UpsertScheduledTaskRequest};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the scheduled-task table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_tasks(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS scheduled_tasks (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                scheduled_date TEXT NOT NULL,
                task_kind TEXT NOT NULL CHECK (task_kind IN
                    ('workout', 'nutrition', 'video', 'document', 'survey', 'evolution')),
                content_id TEXT,
                title TEXT NOT NULL DEFAULT '',
                notes TEXT,
                is_completed BOOLEAN NOT NULL DEFAULT 0,
                completed_at DATETIME,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        // Natural key; COALESCE folds NULL content ids (evolution checkpoints)
        // into one slot per kind and date
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_tasks_natural_key
            ON scheduled_tasks(user_id, scheduled_date, task_kind, COALESCE(content_id, ''))
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_tasks_user_date
            ON scheduled_tasks(user_id, scheduled_date)
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get all of the user's task rows for one calendar date
    ///
    /// Ordered by creation so standalone items keep their assignment order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_scheduled_tasks(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduledTask>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, scheduled_date, task_kind, content_id, title, notes,
                   is_completed, completed_at, created_at
            FROM scheduled_tasks
            WHERE user_id = ?1 AND scheduled_date = ?2
            ORDER BY created_at, id
            ",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_task).collect()
    }

    /// Atomically insert or update a task row keyed by its natural key
    ///
    /// A fresh row gets a generated id; a conflicting insert flips the
    /// existing row's completion fields in place and keeps its id. The
    /// insert-or-update decision happens inside one statement, so two
    /// concurrent callers can never produce two rows for the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert or the follow-up read fails
    pub async fn upsert_scheduled_task(
        &self,
        request: &UpsertScheduledTaskRequest,
    ) -> Result<ScheduledTask> {
        let candidate_id = Uuid::new_v4().to_string();

        sqlx::query(
            r"
            INSERT INTO scheduled_tasks
                (id, user_id, scheduled_date, task_kind, content_id, title, notes,
                 is_completed, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (user_id, scheduled_date, task_kind, COALESCE(content_id, ''))
            DO UPDATE SET
                is_completed = excluded.is_completed,
                completed_at = excluded.completed_at
            ",
        )
        .bind(&candidate_id)
        .bind(request.user_id.to_string())
        .bind(request.date)
        .bind(request.kind.as_str())
        .bind(request.content_id.as_deref())
        .bind(&request.title)
        .bind(request.notes.as_deref())
        .bind(request.is_completed)
        .bind(request.completed_at)
        .execute(self.pool())
        .await?;

        self.get_task_by_natural_key(
            request.user_id,
            request.date,
            request.kind,
            request.content_id.as_deref(),
        )
        .await?
        .ok_or_else(|| anyhow!("Upserted task row disappeared before readback"))
    }

    /// Get a task row by its natural key
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_task_by_natural_key(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        kind: ActivityKind,
        content_id: Option<&str>,
    ) -> Result<Option<ScheduledTask>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, scheduled_date, task_kind, content_id, title, notes,
                   is_completed, completed_at, created_at
            FROM scheduled_tasks
            WHERE user_id = ?1 AND scheduled_date = ?2 AND task_kind = ?3
              AND COALESCE(content_id, '') = COALESCE(?4, '')
            ",
        )
        .bind(user_id.to_string())
        .bind(date)
        .bind(kind.as_str())
        .bind(content_id)
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(Self::row_to_task).transpose()
    }

    /// Convert a database row to a `ScheduledTask`
    fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> Result<ScheduledTask> {
        let user_id: String = row.get("user_id");
        let kind: String = row.get("task_kind");

        Ok(ScheduledTask {
            id: row.get("id"),
            user_id: Uuid::parse_str(&user_id)?,
            date: row.get("scheduled_date"),
            kind: kind.parse()?,
            content_id: row.get("content_id"),
            title: row.get("title"),
            notes: row.get("notes"),
            is_completed: row.get("is_completed"),
            completed_at: row.get("completed_at"),
            created_at: row.get("created_at"),
        })
    }
}
