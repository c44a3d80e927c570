// ABOUTME: File-backed cache storing one JSON document per key with a write timestamp
// ABOUTME: Survives restarts; stale and corrupt entries are deleted on read
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::{AppError, AppResult};

/// On-disk envelope wrapping a cached payload with its write time
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    cached_at: DateTime<Utc>,
    data: serde_json::Value,
}

/// File-backed cache, one pretty-printed JSON document per key
///
/// Writes are plain overwrites; keys are per-user and per-query-shape, so
/// concurrent writers to one key do not occur in normal operation.
#[derive(Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    /// Path of the document holding a key's entry
    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Filesystem-safe stem for a cache key
///
/// Key components may carry arbitrary user identifiers; anything outside
/// `[A-Za-z0-9_-]` collapses to `_` so the stem never escapes the cache dir.
fn file_stem(key: &CacheKey) -> String {
    key.to_string()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Whether a write stamped `cached_at` has outlived `max_age`
fn is_stale(cached_at: DateTime<Utc>, max_age: Duration) -> bool {
    let age = Utc::now().signed_duration_since(cached_at);
    let window = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    age.num_seconds() > window
}

#[async_trait::async_trait]
impl CacheProvider for FileCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        fs::create_dir_all(&config.cache_dir).await.map_err(|e| {
            AppError::storage(format!(
                "failed to create cache directory {}: {e}",
                config.cache_dir.display()
            ))
        })?;

        Ok(Self {
            cache_dir: config.cache_dir,
        })
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &CacheKey, value: &T) -> AppResult<()> {
        let envelope = CacheEnvelope {
            cached_at: Utc::now(),
            data: serde_json::to_value(value)?,
        };

        let path = self.entry_path(key);
        fs::write(&path, serde_json::to_vec_pretty(&envelope)?)
            .await
            .map_err(|e| {
                AppError::storage(format!("failed to write cache entry: {e}"))
                    .with_resource_id(path.display().to_string())
            })?;
        Ok(())
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<T>> {
        let path = self.entry_path(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let envelope: CacheEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                // Corrupt document: delete it and report a miss
                tracing::warn!(key = %key, error = %e, "removing corrupt cache entry");
                remove_if_present(&path).await?;
                return Ok(None);
            }
        };

        if is_stale(envelope.cached_at, max_age) {
            tracing::debug!(key = %key, cached_at = %envelope.cached_at, "cache entry expired");
            remove_if_present(&path).await?;
            return Ok(None);
        }

        match serde_json::from_value(envelope.data) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "removing undecodable cache payload");
            }
        }
        remove_if_present(&path).await?;
        Ok(None)
    }

    async fn delete(&self, key: &CacheKey) -> AppResult<()> {
        remove_if_present(&self.entry_path(key)).await
    }

    async fn clear(&self) -> AppResult<()> {
        let mut entries = fs::read_dir(&self.cache_dir).await?;
        let mut removed = 0_usize;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                remove_if_present(&path).await?;
                removed += 1;
            }
        }

        tracing::debug!(removed, dir = %self.cache_dir.display(), "cleared cache directory");
        Ok(())
    }
}

/// Remove a file, treating an already-absent file as success
async fn remove_if_present(path: &Path) -> AppResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::storage(format!("failed to remove cache entry: {e}"))
            .with_resource_id(path.display().to_string())),
    }
}
