// ABOUTME: Cache factory for environment-based backend selection
// ABOUTME: Enum dispatch over in-memory and file backends behind one interface
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{file::FileCache, memory::InMemoryCache, CacheBackend, CacheConfig, CacheProvider};
use crate::errors::AppResult;

/// Cache instance wrapper that delegates to the configured backend
#[derive(Clone)]
pub enum Cache {
    /// Bounded in-memory backend
    Memory(InMemoryCache),
    /// File-per-key backend
    File(FileCache),
}

impl Cache {
    /// Create new cache instance for the selected backend
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    pub async fn new(backend: CacheBackend, config: CacheConfig) -> AppResult<Self> {
        match backend {
            CacheBackend::Memory => {
                tracing::info!(
                    max_entries = config.max_entries,
                    "initializing in-memory cache"
                );
                Ok(Self::Memory(InMemoryCache::new(config).await?))
            }
            CacheBackend::File => {
                tracing::info!(dir = %config.cache_dir.display(), "initializing file cache");
                Ok(Self::File(FileCache::new(config).await?))
            }
        }
    }

    /// Descriptive string for the active backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "in-memory (bounded LRU)",
            Self::File(_) => "file (JSON document per key)",
        }
    }

    /// Store value under a key, stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    pub async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &super::CacheKey,
        value: &T,
    ) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.set(key, value).await,
            Self::File(cache) => cache.set(key, value).await,
        }
    }

    /// Retrieve a value no older than `max_age`
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        key: &super::CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<T>> {
        match self {
            Self::Memory(cache) => cache.get(key, max_age).await,
            Self::File(cache) => cache.get(key, max_age).await,
        }
    }

    /// Remove a single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    pub async fn delete(&self, key: &super::CacheKey) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.delete(key).await,
            Self::File(cache) => cache.delete(key).await,
        }
    }

    /// Remove all cache entries
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    pub async fn clear(&self) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.clear().await,
            Self::File(cache) => cache.clear().await,
        }
    }
}
