// ABOUTME: Main library entry point for the strider personal-records engine
// ABOUTME: Derives running records and heart rate zones from provider activity data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Strider
//!
//! Strider turns a runner's activity history into personal-best records over
//! the canonical race distances (1 km through marathon) and derives heart rate
//! training zones from per-user configuration. Activity data arrives already
//! fetched and deserialized; strider holds the decision logic, the callers own
//! the transport.
//!
//! ## Features
//!
//! - **Two derivation strategies**: fuzzy distance matching over whole
//!   activities, and exact aggregation of provider best-effort splits
//! - **Heart rate zones**: the six standard percentage bands of max HR, with
//!   an age-predicted fallback
//! - **Expiring cache**: pluggable in-memory and file backends that judge
//!   freshness lazily at read time, with no background eviction
//! - **User profiles**: per-user max HR and age parameters, zones recomputed
//!   on every change so they never drift from their inputs
//!
//! ## Architecture
//!
//! - **Models**: provider-shaped activity records and the derived record types
//! - **Intelligence**: the record engine and zone calculator (pure, no I/O)
//! - **Cache / Profiles**: storage traits with enum-dispatch factories over
//!   in-memory and file backends
//! - **Config**: environment-driven settings handed to components explicitly;
//!   nothing reads globals at call time
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use strider::config::environment::ServerConfig;
//! use strider::intelligence::personal_records::PersonalRecordsEngine;
//! use strider::models::Activity;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let engine = PersonalRecordsEngine::with_config(config.records_config());
//!
//!     let history: Vec<Activity> = serde_json::from_str("[]")?;
//!     let records = engine.records_from_activities(&history);
//!     println!("{}", serde_json::to_string_pretty(&records)?);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the CLI binary (src/bin/) and integration tests
// (tests/). They must remain `pub` so external consumers can access them.

/// Cache abstraction layer with pluggable backends
pub mod cache;

/// Configuration management from environment variables
pub mod config;

/// Application constants and compiled-in defaults
pub mod constants;

/// Unified error handling system with standard error codes
pub mod errors;

/// Personal record derivation and heart rate zone calculation
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Common data models for activities, records, and profiles
pub mod models;

/// User profile storage with pluggable backends
pub mod profiles;
