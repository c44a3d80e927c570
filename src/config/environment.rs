// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables with compiled-in defaults and validation
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management
//!
//! Recognized variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DATA_DIR` | `./data` | Root directory for cache and profile files |
//! | `CACHE_BACKEND` | `file` | `memory` or `file` |
//! | `CACHE_MAX_ENTRIES` | `10000` | Capacity of the in-memory cache |
//! | `PROFILE_BACKEND` | `file` | `memory` or `file` |
//! | `RECORDS_DISTANCE_TOLERANCE` | `0.02` | Fractional distance match window |
//!
//! Logging is configured separately through [`crate::logging`] (`RUST_LOG`,
//! `LOG_FORMAT`, `ENVIRONMENT`).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::cache::{CacheBackend, CacheConfig};
use crate::constants::{cache::DEFAULT_CACHE_MAX_ENTRIES, records, storage};
use crate::errors::{AppError, AppResult};
use crate::intelligence::personal_records::RecordsConfig;
use crate::profiles::{ProfileBackend, ProfileConfig};

/// Cache-related settings
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Selected cache backend
    pub backend: CacheBackend,
    /// Capacity of the in-memory backend
    pub max_entries: usize,
}

/// Profile-store settings
#[derive(Debug, Clone)]
pub struct ProfileSettings {
    /// Selected profile backend
    pub backend: ProfileBackend,
}

/// Record-derivation settings
#[derive(Debug, Clone)]
pub struct RecordsSettings {
    /// Fractional tolerance for distance matching
    pub distance_tolerance: f64,
}

/// Top-level runtime configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Root directory for all persisted data
    pub data_dir: PathBuf,
    /// Cache configuration
    pub cache: CacheSettings,
    /// Profile store configuration
    pub profiles: ProfileSettings,
    /// Record derivation configuration
    pub records: RecordsSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(storage::DEFAULT_DATA_DIR),
            cache: CacheSettings {
                backend: CacheBackend::default(),
                max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            },
            profiles: ProfileSettings {
                backend: ProfileBackend::default(),
            },
            records: RecordsSettings {
                distance_tolerance: records::DEFAULT_DISTANCE_TOLERANCE,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Absent variables fall back to compiled-in defaults; present but
    /// malformed values are configuration errors rather than silent
    /// fallbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if any recognized variable holds an unparseable or
    /// out-of-range value
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            data_dir: env::var("DATA_DIR")
                .map_or_else(|_| PathBuf::from(storage::DEFAULT_DATA_DIR), PathBuf::from),
            cache: CacheSettings {
                backend: parsed_env("CACHE_BACKEND", CacheBackend::default())?,
                max_entries: parsed_env("CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES)?,
            },
            profiles: ProfileSettings {
                backend: parsed_env("PROFILE_BACKEND", ProfileBackend::default())?,
            },
            records: RecordsSettings {
                distance_tolerance: parsed_env(
                    "RECORDS_DISTANCE_TOLERANCE",
                    records::DEFAULT_DISTANCE_TOLERANCE,
                )?,
            },
        };
        config.validate()?;

        info!(
            data_dir = %config.data_dir.display(),
            cache_backend = ?config.cache.backend,
            profile_backend = ?config.profiles.backend,
            distance_tolerance = config.records.distance_tolerance,
            "configuration loaded from environment"
        );
        Ok(config)
    }

    /// Check cross-field and range constraints
    ///
    /// # Errors
    ///
    /// Returns an error if a value is outside its meaningful range
    pub fn validate(&self) -> AppResult<()> {
        let tolerance = self.records.distance_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
            return Err(AppError::config(format!(
                "RECORDS_DISTANCE_TOLERANCE must be between 0 and 1 exclusive, got {tolerance}"
            )));
        }
        Ok(())
    }

    /// Cache configuration derived from these settings
    #[must_use]
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_entries: self.cache.max_entries,
            cache_dir: self.data_dir.join(storage::CACHE_SUBDIR),
        }
    }

    /// Profile store configuration derived from these settings
    #[must_use]
    pub fn profile_config(&self) -> ProfileConfig {
        ProfileConfig {
            profile_dir: self.data_dir.join(storage::PROFILE_SUBDIR),
        }
    }

    /// Record-derivation configuration derived from these settings
    #[must_use]
    pub const fn records_config(&self) -> RecordsConfig {
        RecordsConfig {
            distance_tolerance: self.records.distance_tolerance,
        }
    }
}

/// Read an environment variable, parsing it when present
///
/// Absent means the default; present but unparseable is an error, so typos
/// in deployment config fail loudly instead of silently reverting.
fn parsed_env<T: FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.cache.backend, CacheBackend::File);
        assert_eq!(config.cache.max_entries, 10_000);
        assert_eq!(config.profiles.backend, ProfileBackend::File);
        assert!((config.records.distance_tolerance - 0.02).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_tolerance() {
        let mut config = ServerConfig::default();
        config.records.distance_tolerance = 0.0;
        assert!(config.validate().is_err());

        config.records.distance_tolerance = 1.5;
        assert!(config.validate().is_err());

        config.records.distance_tolerance = 0.05;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_configs_share_the_data_dir() {
        let mut config = ServerConfig::default();
        config.data_dir = PathBuf::from("/var/lib/strider");

        assert_eq!(
            config.cache_config().cache_dir,
            PathBuf::from("/var/lib/strider/cache")
        );
        assert_eq!(
            config.profile_config().profile_dir,
            PathBuf::from("/var/lib/strider/profiles")
        );
    }
}
