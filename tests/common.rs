// ABOUTME: Shared test utilities and fixture builders for integration tests
// ABOUTME: Provides quiet logging setup plus activity and best-effort factories
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(missing_docs)]
//! Shared test utilities for `strider`
//!
//! This module provides common fixture builders to reduce duplication
//! across integration tests.

use std::sync::Once;

use chrono::{DateTime, Utc};
use strider::models::{Activity, BestEffort, SportType};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A run over `distance` meters taking `moving_time` seconds, undated
pub fn run_activity(id: u64, name: &str, distance: f64, moving_time: u64) -> Activity {
    Activity {
        id,
        name: name.to_owned(),
        sport_type: SportType::Run,
        distance,
        moving_time,
        start_date_local: None,
        best_efforts: None,
    }
}

/// Same run, started at `date` (RFC 3339)
pub fn run_activity_on(
    id: u64,
    name: &str,
    distance: f64,
    moving_time: u64,
    date: &str,
) -> Activity {
    Activity {
        start_date_local: Some(parse_date(date)),
        ..run_activity(id, name, distance, moving_time)
    }
}

/// A provider best-effort split, undated
pub fn best_effort(name: &str, moving_time: u64, distance: f64, activity_id: u64) -> BestEffort {
    BestEffort {
        name: name.to_owned(),
        moving_time,
        distance,
        activity_id: Some(activity_id),
        start_date_local: None,
    }
}

/// Same split, dated (RFC 3339)
pub fn best_effort_on(
    name: &str,
    moving_time: u64,
    distance: f64,
    activity_id: u64,
    date: &str,
) -> BestEffort {
    BestEffort {
        start_date_local: Some(parse_date(date)),
        ..best_effort(name, moving_time, distance, activity_id)
    }
}

fn parse_date(date: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(date)
        .unwrap()
        .with_timezone(&Utc)
}
