// ABOUTME: Integration tests for the file-backed cache backend
// ABOUTME: Covers restart persistence, expiry, corrupt-entry healing, and key sanitization
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use strider::cache::{Cache, CacheBackend, CacheConfig, CacheKey, CacheResource};
use tempfile::TempDir;

mod common;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestData {
    value: String,
    count: u32,
}

fn records_key(user: &str) -> CacheKey {
    CacheKey::new(user, CacheResource::PersonalRecords)
}

/// Helper: file cache rooted at `dir`
async fn file_cache_at(dir: &Path) -> Result<Cache> {
    common::init_test_logging();
    let config = CacheConfig {
        max_entries: 100,
        cache_dir: dir.to_path_buf(),
    };
    Ok(Cache::new(CacheBackend::File, config).await?)
}

/// Helper: the `.json` documents currently in the cache directory
fn cache_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Helper: the single document the tests expect in `dir`
fn single_document(dir: &Path) -> PathBuf {
    let files = cache_documents(dir);
    assert_eq!(files.len(), 1, "expected exactly one cache document");
    files.into_iter().next().unwrap()
}

#[tokio::test]
async fn test_entries_survive_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let key = records_key("alice");
    let data = TestData {
        value: "persisted".to_owned(),
        count: 9,
    };

    let first = file_cache_at(dir.path()).await?;
    first.set(&key, &data).await?;
    drop(first);

    // A fresh instance over the same directory sees the entry
    let second = file_cache_at(dir.path()).await?;
    let retrieved: Option<TestData> = second.get(&key, Duration::from_secs(3600)).await?;
    assert_eq!(retrieved, Some(data));

    Ok(())
}

#[tokio::test]
async fn test_expired_entry_is_deleted_on_read() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = file_cache_at(dir.path()).await?;
    let key = records_key("alice");
    cache
        .set(
            &key,
            &TestData {
                value: "fresh".to_owned(),
                count: 1,
            },
        )
        .await?;

    // Back-date the stored document two days
    let document = single_document(dir.path());
    let stale_envelope = serde_json::json!({
        "cached_at": Utc::now() - chrono::Duration::hours(48),
        "data": { "value": "old", "count": 1 },
    });
    std::fs::write(&document, serde_json::to_vec_pretty(&stale_envelope)?)?;

    let retrieved: Option<TestData> = cache
        .get(&key, Duration::from_secs(24 * 3600))
        .await?;
    assert_eq!(retrieved, None);
    assert!(
        cache_documents(dir.path()).is_empty(),
        "expired document should have been removed"
    );

    Ok(())
}

#[tokio::test]
async fn test_corrupt_document_reports_miss_and_heals() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = file_cache_at(dir.path()).await?;
    let key = records_key("alice");
    cache
        .set(
            &key,
            &TestData {
                value: "soon garbage".to_owned(),
                count: 2,
            },
        )
        .await?;

    let document = single_document(dir.path());
    std::fs::write(&document, b"{ not valid json at all")?;

    let retrieved: Option<TestData> = cache.get(&key, Duration::from_secs(3600)).await?;
    assert_eq!(retrieved, None);
    assert!(
        cache_documents(dir.path()).is_empty(),
        "corrupt document should have been removed"
    );

    // Cache is usable again for the same key
    let data = TestData {
        value: "rewritten".to_owned(),
        count: 3,
    };
    cache.set(&key, &data).await?;
    let retrieved: Option<TestData> = cache.get(&key, Duration::from_secs(3600)).await?;
    assert_eq!(retrieved, Some(data));

    Ok(())
}

#[tokio::test]
async fn test_mismatched_payload_reports_miss_and_heals() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = file_cache_at(dir.path()).await?;
    let key = records_key("alice");
    cache
        .set(
            &key,
            &TestData {
                value: "object".to_owned(),
                count: 4,
            },
        )
        .await?;

    // Valid envelope, but the payload no longer matches the requested type
    let mismatched: Option<Vec<u64>> = cache.get(&key, Duration::from_secs(3600)).await?;
    assert_eq!(mismatched, None);
    assert!(cache_documents(dir.path()).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = file_cache_at(dir.path()).await?;
    let key = records_key("alice");
    cache
        .set(
            &key,
            &TestData {
                value: "doomed".to_owned(),
                count: 5,
            },
        )
        .await?;

    cache.delete(&key).await?;
    assert!(cache_documents(dir.path()).is_empty());
    cache.delete(&key).await?;

    Ok(())
}

#[tokio::test]
async fn test_clear_leaves_foreign_files_alone() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = file_cache_at(dir.path()).await?;
    for user in ["alice", "bob"] {
        cache
            .set(
                &records_key(user),
                &TestData {
                    value: user.to_owned(),
                    count: 1,
                },
            )
            .await?;
    }
    let foreign = dir.path().join("README.txt");
    std::fs::write(&foreign, b"not a cache document")?;

    cache.clear().await?;

    assert!(cache_documents(dir.path()).is_empty());
    assert!(foreign.exists(), "clear should only touch .json documents");

    Ok(())
}

#[tokio::test]
async fn test_hostile_user_ids_stay_inside_cache_dir() -> Result<()> {
    let dir = TempDir::new()?;
    let cache = file_cache_at(dir.path()).await?;
    let key = records_key("../../etc/passwd");
    let data = TestData {
        value: "contained".to_owned(),
        count: 6,
    };

    cache.set(&key, &data).await?;

    // The document landed inside the cache dir under a sanitized name
    let document = single_document(dir.path());
    let name = document.file_name().unwrap().to_str().unwrap();
    assert!(name
        .trim_end_matches(".json")
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

    let retrieved: Option<TestData> = cache.get(&key, Duration::from_secs(3600)).await?;
    assert_eq!(retrieved, Some(data));

    Ok(())
}
