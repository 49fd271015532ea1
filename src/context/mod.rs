// ABOUTME: Focused dependency injection contexts for engine composition
// ABOUTME: Type-safe wiring of database and notification dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! Focused dependency injection contexts
//!
//! Engine components receive exactly the dependencies they need through these
//! contexts instead of reaching for process-wide singletons. Event channels in
//! particular are constructor-injected so their lifecycle is explicit:
//! subscribe where the consumer is created, drop the receiver to unsubscribe.

pub mod data;
pub mod notification;

pub use data::DataContext;
pub use notification::NotificationContext;
