// ABOUTME: Intelligence module for personal record derivation and heart rate zones
// ABOUTME: Hosts the components with actual decision logic, everything else is plumbing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Analysis components that derive training insight from raw activity data:
//! the personal-record engine and the heart rate zone calculator. Both are
//! deterministic over their inputs and hold no I/O of their own.

/// Personal record derivation from activities and best-effort splits
pub mod personal_records;
/// Heart rate training zone calculation
pub mod zones;

pub use personal_records::{format_pace, format_time, PersonalRecordsEngine, RecordsConfig};
pub use zones::{calculate_zones, max_hr_from_age};
