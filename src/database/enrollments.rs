// ABOUTME: Program enrollment and day-assignment database operations
// ABOUTME: Active-enrollment lookups and schedule-grid queries per program slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use super::Database;
use crate::models::{ActivityKind, ProgramDayAssignment, ProgramEnrollment, ProgramSource};
use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create enrollment and day-assignment tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_enrollments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS program_enrollments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                source TEXT NOT NULL CHECK (source IN ('admin', 'gatofit', 'weekly')),
                program_id TEXT NOT NULL,
                started_at DATETIME NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        // One active enrollment per source kind per user; inactive history rows
        // are unrestricted
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_enrollments_one_active_per_source
            ON program_enrollments(user_id, source) WHERE is_active = 1
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS program_day_assignments (
                id TEXT PRIMARY KEY,
                program_id TEXT NOT NULL,
                week_number INTEGER NOT NULL CHECK (week_number >= 1),
                day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
                order_in_day INTEGER NOT NULL DEFAULT 0,
                activity_kind TEXT NOT NULL CHECK (activity_kind IN
                    ('workout', 'nutrition', 'video', 'document', 'survey', 'evolution')),
                content_id TEXT CHECK (activity_kind = 'evolution' OR content_id IS NOT NULL),
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_assignments_slot
            ON program_day_assignments(program_id, week_number, day_of_week, activity_kind)
            ",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create a program enrollment row
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the user already
    /// has an active enrollment for the same source
    pub async fn create_program_enrollment(&self, enrollment: &ProgramEnrollment) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO program_enrollments (id, user_id, source, program_id, started_at, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(&enrollment.id)
        .bind(enrollment.user_id.to_string())
        .bind(enrollment.source.as_str())
        .bind(&enrollment.program_id)
        .bind(enrollment.started_at)
        .bind(enrollment.is_active)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get the user's active enrollment for one program source, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_active_enrollment(
        &self,
        user_id: Uuid,
        source: ProgramSource,
    ) -> Result<Option<ProgramEnrollment>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, source, program_id, started_at, is_active, created_at
            FROM program_enrollments
            WHERE user_id = ?1 AND source = ?2 AND is_active = 1
            ",
        )
        .bind(user_id.to_string())
        .bind(source.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(Self::row_to_enrollment).transpose()
    }

    /// Deactivate all of the user's enrollments for one source
    ///
    /// Frees the active slot so a replacement enrollment can be created.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn deactivate_enrollments(&self, user_id: Uuid, source: ProgramSource) -> Result<()> {
        sqlx::query(
            r"
            UPDATE program_enrollments SET is_active = 0
            WHERE user_id = ?1 AND source = ?2 AND is_active = 1
            ",
        )
        .bind(user_id.to_string())
        .bind(source.as_str())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Create one schedule-grid assignment row
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_program_day_assignment(
        &self,
        assignment: &ProgramDayAssignment,
    ) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO program_day_assignments
                (id, program_id, week_number, day_of_week, order_in_day, activity_kind, content_id, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(&assignment.id)
        .bind(&assignment.program_id)
        .bind(i64::from(assignment.week_number))
        .bind(i64::from(assignment.day_of_week))
        .bind(i64::from(assignment.order_in_day))
        .bind(assignment.kind.as_str())
        .bind(assignment.content_id.as_deref())
        .bind(assignment.notes.as_deref())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get one kind's assignments for a program slot, ordered within the day
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_program_day_assignments(
        &self,
        program_id: &str,
        week_number: u32,
        day_of_week: u8,
        kind: ActivityKind,
    ) -> Result<Vec<ProgramDayAssignment>> {
        let rows = sqlx::query(
            r"
            SELECT id, program_id, week_number, day_of_week, order_in_day,
                   activity_kind, content_id, notes
            FROM program_day_assignments
            WHERE program_id = ?1 AND week_number = ?2 AND day_of_week = ?3 AND activity_kind = ?4
            ORDER BY order_in_day, id
            ",
        )
        .bind(program_id)
        .bind(i64::from(week_number))
        .bind(i64::from(day_of_week))
        .bind(kind.as_str())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_assignment).collect()
    }

    /// Convert a database row to a `ProgramEnrollment`
    fn row_to_enrollment(row: &sqlx::sqlite::SqliteRow) -> Result<ProgramEnrollment> {
        let user_id: String = row.get("user_id");
        let source: String = row.get("source");

        Ok(ProgramEnrollment {
            id: row.get("id"),
            user_id: Uuid::parse_str(&user_id)?,
            source: source.parse()?,
            program_id: row.get("program_id"),
            started_at: row.get("started_at"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
        })
    }

    /// Convert a database row to a `ProgramDayAssignment`
    fn row_to_assignment(row: &sqlx::sqlite::SqliteRow) -> Result<ProgramDayAssignment> {
        let kind: String = row.get("activity_kind");
        let week_number: i64 = row.get("week_number");
        let day_of_week: i64 = row.get("day_of_week");
        let order_in_day: i64 = row.get("order_in_day");

        Ok(ProgramDayAssignment {
            id: row.get("id"),
            program_id: row.get("program_id"),
            week_number: u32::try_from(week_number)?,
            day_of_week: u8::try_from(day_of_week)?,
            order_in_day: i32::try_from(order_in_day)?,
            kind: kind.parse()?,
            content_id: row.get("content_id"),
            notes: row.get("notes"),
        })
    }
}
