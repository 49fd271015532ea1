// ABOUTME: Main library entry point for the Gatofit schedule engine
// ABOUTME: Resolves program schedules, merges ad-hoc tasks, and tracks completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

#![deny(unsafe_code)]

//! # Gatofit Schedule Engine
//!
//! Schedule resolution and completion tracking for the Gatofit coaching app.
//! Given a user and a calendar date, the engine decides which schedule source
//! owns that date, projects the date onto the program calendar, aggregates the
//! day's activities across every activity kind, merges the user's ad-hoc
//! tasks, and rolls everything up into a single day view.
//!
//! ## Source precedence
//!
//! A date is resolved against the user's enrollments in fixed order: admin
//! coach programs first, then Gatofit official programs, then weekly
//! repeating plans, and finally standalone scheduled tasks. The first source
//! with schedulable content for the date wins; sources never mix within one
//! day, except that standalone tasks always overlay the winning program.
//!
//! ## Completion
//!
//! Program activities have no per-user rows until acted on. Completion lazily
//! materializes a task row with an atomic upsert, workout completion derives
//! from workout logs, and survey submission stores the response before
//! flipping the task.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gatofit_schedule_engine::config::EngineConfig;
//! use gatofit_schedule_engine::context::{DataContext, NotificationContext};
//! use gatofit_schedule_engine::database_plugins::factory::Database;
//! use gatofit_schedule_engine::engine::DayViewService;
//! use gatofit_schedule_engine::errors::AppResult;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let database = Arc::new(Database::new(&config.database_url.to_connection_string()).await?);
//!     let data = DataContext::new(database);
//!
//!     let service = DayViewService::from_context(
//!         &data,
//!         NotificationContext::with_channel(64),
//!         config,
//!     );
//!
//!     let user_id = uuid::Uuid::new_v4();
//!     let today = chrono::Utc::now().date_naive();
//!     let outcome = service.day_view(user_id, today).await?;
//!     println!("resolved: {outcome:?}");
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the seed binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Calendar-to-program-day projection and UTC day bounds
pub mod calendar;

/// Configuration management and environment parsing
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Focused dependency injection contexts
pub mod context;

/// `SQLite` persistence for enrollments, assignments, tasks, and content
pub mod database;

/// Database abstraction layer with plugin support
pub mod database_plugins;

/// Schedule resolution engine and completion tracking
pub mod engine;

/// Unified error handling system with standard error codes
pub mod errors;

/// Structured logging initialization and helpers
pub mod logging;

/// Domain models shared across the engine
pub mod models;

/// Test utilities for creating consistent schedule fixtures
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
