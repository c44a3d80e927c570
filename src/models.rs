// ABOUTME: Core data models for activities, best efforts, personal records, and profiles
// ABOUTME: Defines Activity, BestEffort, RaceDistance, PersonalRecord and heart rate types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the core data structures used throughout strider.
//! The activity-side models mirror what fitness providers return over the
//! wire; the record-side models are what the derivation engine produces.
//!
//! ## Core Models
//!
//! - `Activity`: a single recorded activity (run, ride, etc.)
//! - `BestEffort`: a provider-computed best split within one activity
//! - `RaceDistance`: the canonical distances records are kept for
//! - `PersonalRecord`: the fastest known performance over a race distance
//! - `HeartRateZone` / `UserProfile`: training zone configuration per user

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::distances;

/// Enumeration of supported sport/activity types
///
/// Serialized as the provider's raw type string ("Run", "Ride", ...), so
/// activity payloads can be decoded without a translation pass. The `Other`
/// variant carries any provider-specific type that does not map to the
/// standard categories, so deserialization never fails on new types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SportType {
    /// Running activity
    Run,
    /// Treadmill running activity
    VirtualRun,
    /// Trail running activity
    TrailRunning,
    /// Cycling/biking activity
    Ride,
    /// Indoor/trainer cycling activity
    VirtualRide,
    /// Swimming activity
    Swim,
    /// Walking activity
    Walk,
    /// Hiking activity
    Hike,
    /// Generic workout/exercise activity
    Workout,
    /// Other activity type not covered by standard categories
    Other(String),
}

impl SportType {
    /// Create `SportType` from a provider's activity type string
    #[must_use]
    pub fn from_provider_string(provider_sport: &str) -> Self {
        match provider_sport {
            "Run" => Self::Run,
            "VirtualRun" => Self::VirtualRun,
            "TrailRunning" => Self::TrailRunning,
            "Ride" => Self::Ride,
            "VirtualRide" => Self::VirtualRide,
            "Swim" => Self::Swim,
            "Walk" => Self::Walk,
            "Hike" => Self::Hike,
            "Workout" => Self::Workout,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The provider's string form of this sport type
    #[must_use]
    pub fn provider_string(&self) -> String {
        match self {
            Self::Run => "Run".into(),
            Self::VirtualRun => "VirtualRun".into(),
            Self::TrailRunning => "TrailRunning".into(),
            Self::Ride => "Ride".into(),
            Self::VirtualRide => "VirtualRide".into(),
            Self::Swim => "Swim".into(),
            Self::Walk => "Walk".into(),
            Self::Hike => "Hike".into(),
            Self::Workout => "Workout".into(),
            Self::Other(name) => name.clone(),
        }
    }

}

impl From<String> for SportType {
    fn from(provider_sport: String) -> Self {
        Self::from_provider_string(&provider_sport)
    }
}

impl From<SportType> for String {
    fn from(sport: SportType) -> Self {
        sport.provider_string()
    }
}

/// A single fitness activity as returned by a provider
///
/// List endpoints return activities without `best_efforts`; detail endpoints
/// populate it for runs. Numeric fields default to zero when a provider
/// omits them, matching how an absent distance is treated downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier for the activity (provider-specific)
    pub id: u64,
    /// Human-readable name/title of the activity
    pub name: String,
    /// Type of sport/activity (run, ride, swim, etc.)
    #[serde(rename = "type")]
    pub sport_type: SportType,
    /// Total distance covered in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds (excludes stopped time)
    #[serde(default)]
    pub moving_time: u64,
    /// When the activity started, in the athlete's local timezone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_local: Option<DateTime<Utc>>,
    /// Best-effort splits computed by the provider (detail endpoints only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_efforts: Option<Vec<BestEffort>>,
}

impl Activity {
    /// Distance in kilometers, for display purposes
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance / distances::METERS_PER_KM
    }
}

/// A provider-computed best split within one activity
///
/// Providers label efforts with distance names ("1k", "5k", "Half-Marathon");
/// only labels that map to a [`RaceDistance`] participate in record
/// aggregation, the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEffort {
    /// Provider's label for the effort distance
    pub name: String,
    /// Moving time for the split in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Split distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Activity this effort was extracted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<u64>,
    /// When the parent activity started, in the athlete's local timezone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_local: Option<DateTime<Utc>>,
}

/// Canonical race distances that personal records are tracked for
///
/// Ordering follows ascending distance, so iteration and serialized maps
/// always list records from 1 km up to the marathon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RaceDistance {
    /// 1 kilometer
    #[serde(rename = "1km")]
    OneKm,
    /// 5 kilometers
    #[serde(rename = "5km")]
    FiveKm,
    /// 10 kilometers
    #[serde(rename = "10km")]
    TenKm,
    /// Half marathon (21.0975 km)
    #[serde(rename = "half_marathon")]
    HalfMarathon,
    /// Marathon (42.195 km)
    #[serde(rename = "marathon")]
    Marathon,
}

impl RaceDistance {
    /// All tracked distances in ascending order
    pub const ALL: [Self; 5] = [
        Self::OneKm,
        Self::FiveKm,
        Self::TenKm,
        Self::HalfMarathon,
        Self::Marathon,
    ];

    /// Target distance in meters
    #[must_use]
    pub const fn target_meters(&self) -> f64 {
        match self {
            Self::OneKm => distances::RACE_1K_M,
            Self::FiveKm => distances::RACE_5K_M,
            Self::TenKm => distances::RACE_10K_M,
            Self::HalfMarathon => distances::HALF_MARATHON_M,
            Self::Marathon => distances::MARATHON_M,
        }
    }

    /// Stable string key used in serialized record maps
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::OneKm => "1km",
            Self::FiveKm => "5km",
            Self::TenKm => "10km",
            Self::HalfMarathon => "half_marathon",
            Self::Marathon => "marathon",
        }
    }

    /// The label providers attach to a best effort over this distance
    #[must_use]
    pub const fn effort_label(&self) -> &'static str {
        match self {
            Self::OneKm => "1k",
            Self::FiveKm => "5k",
            Self::TenKm => "10k",
            Self::HalfMarathon => "Half-Marathon",
            Self::Marathon => "Marathon",
        }
    }

    /// Map a provider's best-effort label back to a tracked distance
    ///
    /// Returns `None` for labels that are not tracked (e.g. "400m", "2 mile").
    #[must_use]
    pub fn from_effort_label(label: &str) -> Option<Self> {
        match label {
            "1k" => Some(Self::OneKm),
            "5k" => Some(Self::FiveKm),
            "10k" => Some(Self::TenKm),
            "Half-Marathon" => Some(Self::HalfMarathon),
            "Marathon" => Some(Self::Marathon),
            _ => None,
        }
    }
}

impl Display for RaceDistance {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

/// A personal record over one canonical race distance
///
/// `activity_name` is present for records derived from whole activities,
/// `effort_name` for records derived from best-effort splits. `date` is the
/// local calendar date of the performance, or empty when the provider did
/// not report a start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Moving time of the record performance in seconds
    pub time_seconds: u64,
    /// Record time formatted as `H:MM:SS` or `M:SS`
    pub time_formatted: String,
    /// Average pace formatted as `M:SS/km`, or `N/A` for zero distance
    pub pace: String,
    /// Local calendar date (`YYYY-MM-DD`) of the performance, may be empty
    pub date: String,
    /// Activity the record was set in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<u64>,
    /// Name of the activity (whole-activity records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    /// Provider label of the best effort (effort-based records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_name: Option<String>,
}

/// Personal records keyed by race distance
///
/// Every tracked distance is always present; `None` means no qualifying
/// performance exists for it yet.
pub type RecordsByDistance = BTreeMap<RaceDistance, Option<PersonalRecord>>;

/// A single heart rate training zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// Zone name ("Recovery", "Aerobic", "Tempo", ...)
    pub name: String,
    /// Minimum heart rate for this zone in BPM
    pub min_bpm: u32,
    /// Maximum heart rate for this zone in BPM
    pub max_bpm: u32,
}

/// Per-user training configuration
///
/// `hr_zones` is always derived from `max_hr` when parameters change; it is
/// only ever set independently through an explicit manual zone update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Maximum heart rate in BPM
    pub max_hr: u32,
    /// Self-reported fitness age in years
    pub fitness_age: Option<u32>,
    /// Chronological age in years
    pub actual_age: Option<u32>,
    /// Heart rate training zones in ascending intensity order
    pub hr_zones: Vec<HeartRateZone>,
}

/// Partial update to a user's training parameters
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New maximum heart rate in BPM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<u32>,
    /// New fitness age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_age: Option<u32>,
    /// New chronological age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_age: Option<u32>,
}

impl ProfileUpdate {
    /// Whether this update carries no changes at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.max_hr.is_none() && self.fitness_age.is_none() && self.actual_age.is_none()
    }
}
