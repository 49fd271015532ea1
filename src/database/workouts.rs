// ABOUTME: Workout log database operations
// ABOUTME: Log existence within day bounds is the source of truth for workout completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use super::Database;
use crate::calendar::day_bounds;
use crate::models::WorkoutLog;
use anyhow::Result;
use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the workout log table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                routine_id TEXT NOT NULL,
                workout_date DATETIME NOT NULL,
                duration_minutes INTEGER,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_workout_logs_user_date
            ON workout_logs(user_id, workout_date)
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Record a logged training session
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_workout_log(&self, log: &WorkoutLog) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO workout_logs (id, user_id, routine_id, workout_date, duration_minutes, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(&log.id)
        .bind(log.user_id.to_string())
        .bind(&log.routine_id)
        .bind(log.workout_date)
        .bind(log.duration_minutes)
        .bind(log.notes.as_deref())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Routine ids the user logged a session for on one calendar date
    ///
    /// Uses the half-open UTC day interval, so a session logged at any
    /// instant of the date counts exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_workout_routine_ids_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>> {
        let (start, end) = day_bounds(date);

        let rows = sqlx::query(
            r"
            SELECT DISTINCT routine_id
            FROM workout_logs
            WHERE user_id = ?1 AND workout_date >= ?2 AND workout_date < ?3
            ",
        )
        .bind(user_id.to_string())
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(|row| row.get("routine_id")).collect())
    }
}
