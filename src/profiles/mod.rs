// ABOUTME: User profile storage abstraction with pluggable backends
// ABOUTME: Profiles hold max HR and ages; zones are recomputed on every parameter change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Profile storage factory for environment-based backend selection
pub mod factory;
/// File-backed profile store implementation
pub mod file;
/// In-memory profile store implementation
pub mod memory;

use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::heart_rate::DEFAULT_MAX_HR;
use crate::constants::storage::{DEFAULT_DATA_DIR, PROFILE_SUBDIR};
use crate::errors::{AppError, AppResult};
use crate::intelligence::zones::calculate_zones;
use crate::models::{HeartRateZone, ProfileUpdate, UserProfile};

pub use factory::ProfileStorage;
pub use file::FileProfileStore;
pub use memory::InMemoryProfileStore;

/// Profile store trait for pluggable backend implementations
///
/// A user who has never saved anything reads back as the default profile;
/// that default is materialized fresh on every read and only hits storage
/// once an explicit update happens.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync + Clone {
    /// Create new profile store with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if store initialization fails
    async fn new(config: ProfileConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Get a user's profile, or the unsaved default if none exists
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails or a stored profile is
    /// unreadable
    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile>;

    /// Overwrite a user's zones verbatim, bypassing the calculator
    ///
    /// The escape hatch for athletes with lab-measured zones. Persists and
    /// returns the updated profile.
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    async fn update_zones(
        &self,
        user_id: &str,
        zones: Vec<HeartRateZone>,
    ) -> AppResult<UserProfile>;

    /// Apply a partial parameter update and recompute zones from max HR
    ///
    /// Zones are recomputed on every call, even when `max_hr` itself did not
    /// change, so zones and max HR can never drift apart. Persists and
    /// returns the updated profile.
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    async fn update_parameters(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> AppResult<UserProfile>;
}

/// Profile store configuration
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Directory holding per-user profile files (file backend)
    pub profile_dir: PathBuf,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            profile_dir: PathBuf::from(DEFAULT_DATA_DIR).join(PROFILE_SUBDIR),
        }
    }
}

/// Supported profile store backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileBackend {
    /// In-memory store, lost on restart
    Memory,
    /// One JSON document per user under the profile directory
    #[default]
    File,
}

impl FromStr for ProfileBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(AppError::config(format!(
                "unsupported profile backend '{other}', expected 'memory' or 'file'"
            ))),
        }
    }
}

/// The profile a user has before saving anything
#[must_use]
pub fn default_profile() -> UserProfile {
    UserProfile {
        max_hr: DEFAULT_MAX_HR,
        fitness_age: None,
        actual_age: None,
        hr_zones: calculate_zones(DEFAULT_MAX_HR),
    }
}

/// Apply a parameter update to a profile and recompute its zones
///
/// Shared by all backends so update semantics cannot diverge between them.
pub(crate) fn apply_update(profile: &mut UserProfile, update: &ProfileUpdate) {
    if let Some(max_hr) = update.max_hr {
        profile.max_hr = max_hr;
    }
    if let Some(fitness_age) = update.fitness_age {
        profile.fitness_age = Some(fitness_age);
    }
    if let Some(actual_age) = update.actual_age {
        profile.actual_age = Some(actual_age);
    }

    // Unconditional: zones track max_hr even when this update left it alone
    profile.hr_zones = calculate_zones(profile.max_hr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_uses_190_bpm() {
        let profile = default_profile();
        assert_eq!(profile.max_hr, 190);
        assert!(profile.fitness_age.is_none());
        assert!(profile.actual_age.is_none());
        assert_eq!(profile.hr_zones, calculate_zones(190));
    }

    #[test]
    fn test_apply_update_recomputes_zones_from_new_max_hr() {
        let mut profile = default_profile();
        apply_update(
            &mut profile,
            &ProfileUpdate {
                max_hr: Some(180),
                ..ProfileUpdate::default()
            },
        );

        assert_eq!(profile.max_hr, 180);
        assert_eq!(profile.hr_zones, calculate_zones(180));
    }

    #[test]
    fn test_apply_update_recomputes_zones_even_without_max_hr_change() {
        let mut profile = default_profile();
        // Simulate drifted zones (e.g. from an earlier manual overwrite)
        profile.hr_zones = vec![HeartRateZone {
            name: "Custom".into(),
            min_bpm: 1,
            max_bpm: 2,
        }];

        apply_update(
            &mut profile,
            &ProfileUpdate {
                actual_age: Some(34),
                ..ProfileUpdate::default()
            },
        );

        assert_eq!(profile.actual_age, Some(34));
        assert_eq!(profile.hr_zones, calculate_zones(190));
    }

    #[test]
    fn test_profile_backend_from_str() {
        assert_eq!(
            "file".parse::<ProfileBackend>().unwrap(),
            ProfileBackend::File
        );
        assert_eq!(
            "MEMORY".parse::<ProfileBackend>().unwrap(),
            ProfileBackend::Memory
        );
        assert!("postgres".parse::<ProfileBackend>().is_err());
    }
}
