// ABOUTME: SQLite database management for schedule, content, and completion data
// ABOUTME: Owns the connection pool and orchestrates per-domain schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Database Management
//!
//! Inner persistence layer for the schedule engine: program enrollments and
//! day assignments, content libraries, scheduled tasks, workout logs, and
//! survey responses. Callers outside this module go through the
//! [`crate::database_plugins::DatabaseProvider`] abstraction.

mod content;
mod enrollments;
mod surveys;
mod tasks;
mod workouts;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for schedule and completion storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or any
    /// migration statement fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails to execute
    pub async fn migrate(&self) -> Result<()> {
        // Enrollment and program schedule tables
        self.migrate_enrollments().await?;

        // Content library tables
        self.migrate_content().await?;

        // Per-date task rows
        self.migrate_tasks().await?;

        // Workout logs (completion source of truth for workouts)
        self.migrate_workouts().await?;

        // Survey responses
        self.migrate_surveys().await?;

        Ok(())
    }
}
