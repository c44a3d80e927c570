// ABOUTME: Cache abstraction layer for provider API responses with per-user keys
// ABOUTME: Pluggable backends (in-memory, file) with lazy read-time expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache factory for environment-based backend selection
pub mod factory;
/// File-backed cache implementation
pub mod file;
/// In-memory cache implementation
pub mod memory;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_MAX_AGE_HOURS, MAX_AGE_ACTIVITY_LIST_HOURS,
    SECONDS_PER_HOUR,
};
use crate::constants::storage::{CACHE_SUBDIR, DEFAULT_DATA_DIR};
use crate::errors::{AppError, AppResult};

pub use factory::Cache;
pub use file::FileCache;
pub use memory::InMemoryCache;

/// Cache provider trait for pluggable backend implementations
///
/// Entries are stamped with their write time; freshness is the reader's
/// decision, passed as `max_age` on every [`get`](CacheProvider::get). There
/// is no background eviction anywhere: an entry that outlives its window is
/// removed lazily by the read that finds it stale.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use strider::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
/// use strider::cache::memory::InMemoryCache;
/// # async fn example() -> Result<(), strider::errors::AppError> {
///
/// let cache = InMemoryCache::new(CacheConfig::default()).await?;
/// let key = CacheKey::new("athlete_42", CacheResource::PersonalRecords);
///
/// cache.set(&key, &"derived records").await?;
/// let cached: Option<String> = cache.get(&key, Duration::from_secs(3600)).await?;
/// assert!(cached.is_some());
///
/// cache.delete(&key).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value under a key, stamped with the current time
    ///
    /// Unconditionally overwrites whatever was there before.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(&self, key: &CacheKey, value: &T) -> AppResult<()>;

    /// Retrieve a value no older than `max_age`
    ///
    /// A stale entry is deleted as a side effect of the read and reported as
    /// a miss. An entry that fails to decode is treated the same way, so a
    /// corrupt cache heals itself instead of wedging the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<T>>;

    /// Remove a single cache entry; removing an absent key is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    async fn delete(&self, key: &CacheKey) -> AppResult<()>;

    /// Remove all cache entries
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    async fn clear(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries (in-memory backend)
    pub max_entries: usize,
    /// Directory holding cache entry files (file backend)
    pub cache_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cache_dir: PathBuf::from(DEFAULT_DATA_DIR).join(CACHE_SUBDIR),
        }
    }
}

/// Supported cache backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheBackend {
    /// Bounded in-memory store, lost on restart
    Memory,
    /// One JSON document per key under the cache directory
    #[default]
    File,
}

impl FromStr for CacheBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(AppError::config(format!(
                "unsupported cache backend '{other}', expected 'memory' or 'file'"
            ))),
        }
    }
}

/// Structured cache key with per-user isolation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// User the cached data belongs to
    pub user_id: String,
    /// Specific resource being cached
    pub resource: CacheResource,
}

impl CacheKey {
    /// Create new cache key
    pub fn new(user_id: impl Into<String>, resource: CacheResource) -> Self {
        Self {
            user_id: user_id.into(),
            resource,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}:{}", self.user_id, self.resource)
    }
}

/// Cache resource types with their identifying parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheResource {
    /// One page of the user's activity list
    ActivityList {
        /// Page number for pagination
        page: u32,
        /// Items per page
        per_page: u32,
    },
    /// Detailed activity including best-effort splits
    DetailedActivity {
        /// Activity ID
        activity_id: u64,
    },
    /// Derived personal records for the user
    PersonalRecords,
}

impl CacheResource {
    /// Default freshness window for this resource type
    ///
    /// Callers can always pass a different window to `get`; these are the
    /// values the CLI and service wiring use.
    #[must_use]
    pub const fn default_max_age(&self) -> Duration {
        match self {
            Self::ActivityList { .. } => {
                Duration::from_secs(MAX_AGE_ACTIVITY_LIST_HOURS * SECONDS_PER_HOUR)
            }
            Self::DetailedActivity { .. } | Self::PersonalRecords => {
                Duration::from_secs(DEFAULT_MAX_AGE_HOURS * SECONDS_PER_HOUR)
            }
        }
    }
}

impl fmt::Display for CacheResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivityList { page, per_page } => {
                write!(f, "activity_list:page:{page}:per_page:{per_page}")
            }
            Self::DetailedActivity { activity_id } => {
                write!(f, "detailed_activity:{activity_id}")
            }
            Self::PersonalRecords => write!(f, "personal_records"),
        }
    }
}
