// ABOUTME: Schedule resolution engine - source precedence through day completion
// ABOUTME: Composes resolver, aggregator, overlay, tracker, and rollup behind one facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Schedule Resolution Engine
//!
//! The pipeline behind "what does this user's day look like":
//!
//! 1. [`resolver`] picks the authoritative schedule source for the date
//! 2. [`aggregator`] collects the program day's activities across all kinds
//! 3. [`overlay`] merges the user's ad-hoc task rows into the program day
//! 4. [`completion`] annotates workout-log completion and records new ones
//! 5. [`rollup`] folds the activities into a single day-complete flag
//!
//! [`day_view::DayViewService`] runs the whole pipeline per request, bounded
//! by the configured timeout and fenced against stale responses.

pub mod aggregator;
pub mod completion;
pub mod day_view;
pub mod overlay;
pub mod resolver;
pub mod rollup;

pub use aggregator::ActivityAggregator;
pub use completion::{annotate_workouts, CompletionTracker};
pub use day_view::{DayViewService, RequestGeneration};
pub use overlay::{attach_tasks, ScheduledOverlay};
pub use resolver::ProgramResolver;
pub use rollup::day_complete;
