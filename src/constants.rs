// ABOUTME: System-wide constants and configuration values for the schedule engine
// ABOUTME: Contains db string constants, environment variable names, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Constants Module
//!
//! Application constants and environment-based configuration values. Database
//! string representations live here so model round-trips and migrations agree
//! on a single spelling.

/// Program source database strings
pub mod sources {
    /// Coach-assigned curriculum
    pub const ADMIN: &str = "admin";
    /// Vendor-authored multi-week curriculum
    pub const GATOFIT: &str = "gatofit";
    /// Self-service repeating weekly template
    pub const WEEKLY: &str = "weekly";
    /// Pseudo-source carrying ad-hoc tasks when no program matches
    pub const STANDALONE: &str = "standalone";
}

/// Activity kind database strings
pub mod activity_kinds {
    /// Routine-backed training session
    pub const WORKOUT: &str = "workout";
    /// Nutrition plan (informational)
    pub const NUTRITION: &str = "nutrition";
    /// Library video
    pub const VIDEO: &str = "video";
    /// Library document
    pub const DOCUMENT: &str = "document";
    /// Library survey
    pub const SURVEY: &str = "survey";
    /// Evolution checkpoint (body-measurement prompt)
    pub const EVOLUTION: &str = "evolution";
}

/// Service identifiers for structured logging
pub mod service_names {
    /// Canonical service name emitted on every startup log line
    pub const SCHEDULE_ENGINE: &str = "gatofit-schedule-engine";
}

/// Environment variable names read by the engine
pub mod env_vars {
    /// Backing store connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Per-resolution timeout in seconds
    pub const RESOLUTION_TIMEOUT_SECS: &str = "RESOLUTION_TIMEOUT_SECS";
    /// Log level filter (standard tracing syntax)
    pub const RUST_LOG: &str = "RUST_LOG";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment name (development, production)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default backing store URL (file-backed local database)
    pub const DATABASE_URL: &str = "sqlite:./data/gatofit.db";
    /// Default per-resolution timeout in seconds
    pub const RESOLUTION_TIMEOUT_SECS: u64 = 10;
    /// Default log level when `RUST_LOG` is unset
    pub const LOG_LEVEL: &str = "info";
    /// Default deployment environment
    pub const ENVIRONMENT: &str = "development";
}

/// Schedule arithmetic limits
pub mod limits {
    /// Days per schedule week
    pub const DAYS_PER_WEEK: i64 = 7;
    /// Highest valid Monday-first day index (0 = Monday)
    pub const MAX_DAY_OF_WEEK: u8 = 6;
}
