// ABOUTME: Personal record derivation engine over activities and best-effort splits
// ABOUTME: Fuzzy distance matching with configurable tolerance plus time/pace formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Personal record derivation
//!
//! Two derivation paths produce the same record map:
//!
//! - **Whole activities**: a run whose total distance lands within a
//!   configurable tolerance of a canonical race distance counts as an
//!   attempt at that distance. Coarse, but works with list-endpoint data
//!   alone.
//! - **Best-effort splits**: provider-computed splits are matched by label
//!   and aggregated across activities. Precise, but requires per-activity
//!   detail fetches.
//!
//! Both paths keep the fastest qualifying moving time per distance; ties
//! keep the earliest candidate encountered. Every tracked distance is
//! present in the output, `None` when nothing qualifies.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::{distances::METERS_PER_KM, records::DEFAULT_DISTANCE_TOLERANCE};
use crate::models::{
    Activity, BestEffort, PersonalRecord, RaceDistance, RecordsByDistance, SportType,
};

/// Tuning knobs for record derivation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordsConfig {
    /// Fractional tolerance for matching an activity's distance against a
    /// target (0.02 accepts 4900-5100 m for the 5 km record)
    pub distance_tolerance: f64,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            distance_tolerance: DEFAULT_DISTANCE_TOLERANCE,
        }
    }
}

impl RecordsConfig {
    /// Create a config with an explicit distance tolerance
    #[must_use]
    pub const fn new(distance_tolerance: f64) -> Self {
        Self { distance_tolerance }
    }
}

/// Derives personal records from activity history
#[derive(Debug, Clone, Default)]
pub struct PersonalRecordsEngine {
    config: RecordsConfig,
}

impl PersonalRecordsEngine {
    /// Create an engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given configuration
    #[must_use]
    pub const fn with_config(config: RecordsConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &RecordsConfig {
        &self.config
    }

    /// Derive records by matching whole run activities against canonical
    /// distances within the configured tolerance
    ///
    /// Only activities of sport type `Run` with a positive moving time
    /// participate. An activity can hold records at several distances if
    /// its length qualifies for more than one target, which cannot happen
    /// with the canonical set and a tolerance below ~50%.
    #[must_use]
    pub fn records_from_activities(&self, activities: &[Activity]) -> RecordsByDistance {
        let runs: Vec<&Activity> = activities
            .iter()
            .filter(|a| a.sport_type == SportType::Run)
            .collect();
        debug!(
            total = activities.len(),
            runs = runs.len(),
            tolerance = self.config.distance_tolerance,
            "deriving personal records from whole activities"
        );

        let mut records = empty_records();
        for distance in RaceDistance::ALL {
            let target = distance.target_meters();
            let max_diff = target * self.config.distance_tolerance;

            let mut best: Option<&Activity> = None;
            for activity in &runs {
                if (activity.distance - target).abs() > max_diff || activity.moving_time == 0 {
                    continue;
                }
                match best {
                    Some(current) if activity.moving_time >= current.moving_time => {}
                    _ => best = Some(activity),
                }
            }

            if let Some(activity) = best {
                debug!(
                    distance = %distance,
                    activity_id = activity.id,
                    time_seconds = activity.moving_time,
                    "personal record found"
                );
                records.insert(
                    distance,
                    Some(PersonalRecord {
                        time_seconds: activity.moving_time,
                        time_formatted: format_time(activity.moving_time),
                        pace: format_pace(activity.moving_time, activity.distance),
                        date: local_date(activity.start_date_local.as_ref()),
                        activity_id: Some(activity.id),
                        activity_name: Some(activity.name.clone()),
                        effort_name: None,
                    }),
                );
            }
        }
        records
    }

    /// Derive records by aggregating provider best-effort splits across
    /// activities
    ///
    /// Efforts whose labels do not map to a tracked distance are skipped,
    /// as are efforts with a zero moving time. The pace reflects the
    /// effort's reported distance; a zero distance yields `N/A`.
    #[must_use]
    pub fn records_from_best_efforts(
        &self,
        efforts_by_activity: &[Vec<BestEffort>],
    ) -> RecordsByDistance {
        let mut records = empty_records();
        let mut considered = 0_usize;

        for effort in efforts_by_activity.iter().flatten() {
            let Some(distance) = RaceDistance::from_effort_label(&effort.name) else {
                continue;
            };
            if effort.moving_time == 0 {
                continue;
            }
            considered += 1;

            let entry = records.entry(distance).or_insert(None);
            let beaten = match entry {
                Some(current) => effort.moving_time < current.time_seconds,
                None => true,
            };
            if beaten {
                *entry = Some(PersonalRecord {
                    time_seconds: effort.moving_time,
                    time_formatted: format_time(effort.moving_time),
                    pace: format_pace(effort.moving_time, effort.distance),
                    date: local_date(effort.start_date_local.as_ref()),
                    activity_id: effort.activity_id,
                    activity_name: None,
                    effort_name: Some(effort.name.clone()),
                });
            }
        }

        debug!(
            activities = efforts_by_activity.len(),
            considered, "derived personal records from best-effort splits"
        );
        records
    }
}

/// Record map with every tracked distance present and unset
fn empty_records() -> RecordsByDistance {
    RaceDistance::ALL.iter().map(|d| (*d, None)).collect()
}

/// Format a duration in seconds as `H:MM:SS`, or `M:SS` under an hour
///
/// Hours and leading minutes are not zero-padded: 65 s is `1:05`,
/// 3_725 s is `1:02:05`.
#[must_use]
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Format an average pace over a distance as `M:SS/km`
///
/// Returns `N/A` when the distance is zero, since no pace is defined.
/// Fractional seconds are truncated, matching stopwatch display.
#[must_use]
pub fn format_pace(time_seconds: u64, distance_meters: f64) -> String {
    if distance_meters == 0.0 {
        return "N/A".into();
    }

    let pace_seconds = (time_seconds as f64 / distance_meters) * METERS_PER_KM;
    let pace_minutes = (pace_seconds / 60.0) as u64;
    let pace_secs = (pace_seconds % 60.0) as u64;

    format!("{pace_minutes}:{pace_secs:02}/km")
}

/// Local calendar date of a timestamp, empty when absent
fn local_date(start: Option<&DateTime<Utc>>) -> String {
    start.map_or_else(String::new, |dt| dt.format("%Y-%m-%d").to_string())
}
