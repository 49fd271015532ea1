// ABOUTME: Environment-based configuration loading for the schedule engine
// ABOUTME: Typed database URL parsing, timeouts, and deployment environment detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! Environment configuration with typed URLs and parse-or-default semantics.
//! Malformed numeric values log a warning and fall back to the documented
//! default instead of failing startup.

use crate::constants::{defaults, env_vars};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    Development,
    /// Production deployment
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from an environment string, defaulting to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is the production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// PostgreSQL connection (recognized but not served by this build)
    PostgreSQL {
        /// Full connection string
        connection_string: String,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        if s.starts_with("sqlite:") {
            let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
            if path_str == ":memory:" {
                Self::Memory
            } else {
                Self::SQLite {
                    path: PathBuf::from(path_str),
                }
            }
        } else if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            Self::PostgreSQL {
                connection_string: s.to_owned(),
            }
        } else {
            // Fallback: treat as SQLite file path
            Self::SQLite {
                path: PathBuf::from(s),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::PostgreSQL { connection_string } => connection_string.clone(),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

/// Engine configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Backing store location
    pub database_url: DatabaseUrl,
    /// Upper bound for one end-to-end day-view resolution, in seconds
    pub resolution_timeout_secs: u64,
    /// Log level passed to the logging layer
    pub log_level: String,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` return keeps the signature stable
    /// for callers when validation is added.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var(env_vars::ENVIRONMENT).unwrap_or_else(|_| defaults::ENVIRONMENT.to_owned()),
        );

        let database_url = env::var(env_vars::DATABASE_URL)
            .map_or_else(|_| DatabaseUrl::default(), |url| DatabaseUrl::parse_url(&url));

        let resolution_timeout_secs = match env::var(env_vars::RESOLUTION_TIMEOUT_SECS) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    "Invalid {} value '{raw}', using default {}s",
                    env_vars::RESOLUTION_TIMEOUT_SECS,
                    defaults::RESOLUTION_TIMEOUT_SECS
                );
                defaults::RESOLUTION_TIMEOUT_SECS
            }),
            Err(_) => defaults::RESOLUTION_TIMEOUT_SECS,
        };

        let log_level =
            env::var(env_vars::RUST_LOG).unwrap_or_else(|_| defaults::LOG_LEVEL.to_owned());

        Ok(Self {
            environment,
            database_url,
            resolution_timeout_secs,
            log_level,
        })
    }

    /// Per-resolution timeout as a [`Duration`]
    #[must_use]
    pub const fn resolution_timeout(&self) -> Duration {
        Duration::from_secs(self.resolution_timeout_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            database_url: DatabaseUrl::default(),
            resolution_timeout_secs: defaults::RESOLUTION_TIMEOUT_SECS,
            log_level: defaults::LOG_LEVEL.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("production"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything-else"),
            Environment::Development
        );
    }

    #[test]
    fn test_database_url_sqlite_path() {
        let url = DatabaseUrl::parse_url("sqlite:./data/app.db");
        assert_eq!(
            url,
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/app.db")
            }
        );
        assert_eq!(url.to_connection_string(), "sqlite:./data/app.db");
    }

    #[test]
    fn test_database_url_memory() {
        let url = DatabaseUrl::parse_url("sqlite::memory:");
        assert!(url.is_memory());
        assert_eq!(url.to_connection_string(), "sqlite::memory:");
    }

    #[test]
    fn test_database_url_postgres_recognized() {
        let url = DatabaseUrl::parse_url("postgresql://localhost/gatofit");
        assert!(matches!(url, DatabaseUrl::PostgreSQL { .. }));
    }

    #[test]
    fn test_database_url_bare_path_falls_back_to_sqlite() {
        let url = DatabaseUrl::parse_url("./gatofit.db");
        assert!(matches!(url, DatabaseUrl::SQLite { .. }));
    }

    #[test]
    fn test_default_config_timeout() {
        let config = EngineConfig::default();
        assert_eq!(config.resolution_timeout(), Duration::from_secs(10));
    }
}
