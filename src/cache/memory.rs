// ABOUTME: In-memory cache implementation with LRU bounding and lazy expiry
// ABOUTME: Entries carry their write instant; staleness is judged per read
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::AppResult;

/// In-memory cache entry stamped with its write time
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
        }
    }

    fn is_stale(&self, max_age: Duration) -> bool {
        self.stored_at.elapsed() > max_age
    }
}

/// In-memory cache with LRU eviction
///
/// Uses `Arc<RwLock<LruCache>>` so clones share one store. Capacity bounding
/// is the only active eviction; stale entries are removed by the reads that
/// find them, never by a background task.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl InMemoryCache {
    /// Default cache capacity when config specifies zero entries
    /// Note: checked at compile time, the `unreachable` arm cannot be hit
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    fn new_with_config(config: &CacheConfig) -> Self {
        // LruCache requires NonZeroUsize for capacity
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);

        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self::new_with_config(&config))
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &CacheKey, value: &T) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let entry = CacheEntry::new(serialized);

        // LruCache handles capacity eviction automatically on push
        self.store.write().await.push(key.to_string(), entry);

        Ok(())
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        key: &CacheKey,
        max_age: Duration,
    ) -> AppResult<Option<T>> {
        let key_string = key.to_string();
        let mut store = self.store.write().await;

        // LruCache::get is mutable (updates access order for LRU)
        let Some(entry) = store.get(&key_string) else {
            return Ok(None);
        };

        if entry.is_stale(max_age) {
            store.pop(&key_string);
            drop(store);
            tracing::debug!(key = %key, "evicted stale cache entry on read");
            return Ok(None);
        }

        match serde_json::from_slice(&entry.data) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Undecodable entry: drop it and report a miss
                store.pop(&key_string);
                drop(store);
                tracing::warn!(key = %key, error = %e, "removed undecodable cache entry");
                Ok(None)
            }
        }
    }

    async fn delete(&self, key: &CacheKey) -> AppResult<()> {
        self.store.write().await.pop(&key.to_string());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.store.write().await.clear();
        Ok(())
    }
}
