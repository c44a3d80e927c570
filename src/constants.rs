// ABOUTME: System-wide constants for race distances, heart rate zones, and cache defaults
// ABOUTME: Provides hardcoded fallback values that environment configuration can override
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Application constants grouped by concern. Environment-based overrides live in
//! [`crate::config::environment`]; the values here are the compiled-in defaults.

/// Canonical race distances in meters
pub mod distances {
    /// Meters per kilometer, used for pace normalization
    pub const METERS_PER_KM: f64 = 1000.0;

    /// 1 kilometer race distance
    pub const RACE_1K_M: f64 = 1000.0;

    /// 5 kilometer race distance
    pub const RACE_5K_M: f64 = 5000.0;

    /// 10 kilometer race distance
    pub const RACE_10K_M: f64 = 10_000.0;

    /// Half marathon race distance (21.0975 km)
    pub const HALF_MARATHON_M: f64 = 21_097.5;

    /// Marathon race distance (42.195 km)
    pub const MARATHON_M: f64 = 42_195.0;
}

/// Heart rate zone boundaries and physiological defaults
pub mod heart_rate {
    /// Default maximum heart rate when a user has not configured one
    pub const DEFAULT_MAX_HR: u32 = 190;

    /// Base value for the age-predicted maximum heart rate formula (220 - age)
    pub const AGE_PREDICTED_HR_BASE: u32 = 220;

    /// Zone 1 (recovery) lower bound as a fraction of max HR
    pub const RECOVERY_LOW_FRACTION: f64 = 0.50;

    /// Zone 1/2 boundary (recovery top, aerobic floor)
    pub const AEROBIC_LOW_FRACTION: f64 = 0.60;

    /// Zone 2/3 boundary (aerobic top, tempo floor)
    pub const TEMPO_LOW_FRACTION: f64 = 0.70;

    /// Zone 3/4 boundary (tempo top, threshold floor)
    pub const THRESHOLD_LOW_FRACTION: f64 = 0.80;

    /// Zone 4/5 boundary (threshold top, VO2 max floor)
    pub const VO2_MAX_LOW_FRACTION: f64 = 0.90;

    /// Zone 5/6 boundary (VO2 max top, anaerobic floor)
    pub const ANAEROBIC_LOW_FRACTION: f64 = 0.95;
}

/// Personal record matching configuration defaults
pub mod records {
    /// Default tolerance when matching an effort or activity against a target
    /// distance. An effort qualifies when its distance is within this fraction
    /// of the target (e.g. 0.02 accepts 4900-5100 m for a 5 km record).
    pub const DEFAULT_DISTANCE_TOLERANCE: f64 = 0.02;
}

/// Cache-related constants for capacity and expiry defaults
pub mod cache {
    /// Default maximum cache entries for the in-memory backend
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

    /// Default maximum age for cached entries (24 hours)
    pub const DEFAULT_MAX_AGE_HOURS: u64 = 24;

    /// Activity list cache max age in hours - lists need to pick up new uploads
    pub const MAX_AGE_ACTIVITY_LIST_HOURS: u64 = 6;

    /// Seconds per hour, for converting configured hours into durations
    pub const SECONDS_PER_HOUR: u64 = 3_600;
}

/// Service identity for logs and diagnostics
pub mod service_names {
    /// Canonical service name for structured logging
    pub const STRIDER: &str = "strider";
}

/// Filesystem layout defaults for file-backed storage
pub mod storage {
    /// Default root directory for all persisted data
    pub const DEFAULT_DATA_DIR: &str = "./data";

    /// Subdirectory of the data dir holding cache entries
    pub const CACHE_SUBDIR: &str = "cache";

    /// Subdirectory of the data dir holding user profiles
    pub const PROFILE_SUBDIR: &str = "profiles";
}
