// ABOUTME: Data context for dependency injection of the database backend
// ABOUTME: Holds the factory-selected database behind an Arc for cheap sharing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

use crate::database_plugins::factory::Database;
use std::sync::Arc;

/// Data context containing database dependencies
///
/// # Dependencies
/// - `database`: Primary database interface for all persistence operations
#[derive(Clone)]
pub struct DataContext {
    database: Arc<Database>,
}

impl DataContext {
    /// Create new data context
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Get database for persistence operations
    #[must_use]
    pub const fn database(&self) -> &Arc<Database> {
        &self.database
    }
}
