// ABOUTME: Configuration module for the schedule engine
// ABOUTME: Environment-driven settings with typed database URLs and safe defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gatofit

//! # Configuration Module
//!
//! Environment-based configuration. All settings have working defaults so the
//! engine runs with zero configuration in development.

pub mod environment;

pub use environment::{DatabaseUrl, EngineConfig, Environment};
