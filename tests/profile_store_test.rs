// ABOUTME: Integration tests for user profile storage across backends
// ABOUTME: Covers default materialization, zone recomputation, persistence, and corrupt data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::Result;
use strider::intelligence::calculate_zones;
use strider::models::{HeartRateZone, ProfileUpdate};
use strider::profiles::{default_profile, ProfileBackend, ProfileConfig, ProfileStorage};
use tempfile::TempDir;

mod common;

/// Helper: file-backed profile storage rooted at `dir`
async fn file_store_at(dir: &Path) -> Result<ProfileStorage> {
    common::init_test_logging();
    let config = ProfileConfig {
        profile_dir: dir.to_path_buf(),
    };
    Ok(ProfileStorage::new(ProfileBackend::File, config).await?)
}

/// Helper: profile documents currently in `dir`
fn profile_documents(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

/// Zones nobody's calculator would produce, for drift scenarios
fn lab_zones() -> Vec<HeartRateZone> {
    vec![
        HeartRateZone {
            name: "Base".to_owned(),
            min_bpm: 99,
            max_bpm: 144,
        },
        HeartRateZone {
            name: "Threshold".to_owned(),
            min_bpm: 145,
            max_bpm: 171,
        },
    ]
}

#[tokio::test]
async fn test_unsaved_user_reads_default_without_persisting() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    let profile = storage.get_profile("nobody").await?;
    assert_eq!(profile, default_profile());
    assert_eq!(profile.max_hr, 190);
    assert!(profile.fitness_age.is_none());

    // Reading never writes; the directory stays empty
    assert!(profile_documents(dir.path()).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_parameters_recomputes_zones() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    let update = ProfileUpdate {
        max_hr: Some(180),
        ..ProfileUpdate::default()
    };
    let profile = storage.update_parameters("alice", update).await?;

    assert_eq!(profile.max_hr, 180);
    assert_eq!(profile.hr_zones, calculate_zones(180));
    assert!(profile.fitness_age.is_none());
    assert!(profile.actual_age.is_none());

    Ok(())
}

#[tokio::test]
async fn test_partial_update_repairs_zone_drift() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    storage.update_zones("alice", lab_zones()).await?;

    // Touching an unrelated parameter resyncs zones with the stored max HR
    let update = ProfileUpdate {
        fitness_age: Some(30),
        ..ProfileUpdate::default()
    };
    let profile = storage.update_parameters("alice", update).await?;

    assert_eq!(profile.fitness_age, Some(30));
    assert_eq!(profile.hr_zones, calculate_zones(profile.max_hr));

    Ok(())
}

#[tokio::test]
async fn test_empty_update_resyncs_zones_from_stored_max_hr() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    storage.update_zones("alice", lab_zones()).await?;
    let profile = storage
        .update_parameters("alice", ProfileUpdate::default())
        .await?;

    assert_eq!(profile.max_hr, 190);
    assert_eq!(profile.hr_zones, calculate_zones(190));

    Ok(())
}

#[tokio::test]
async fn test_manual_zones_persist_verbatim() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    let updated = storage.update_zones("alice", lab_zones()).await?;
    assert_eq!(updated.hr_zones, lab_zones());
    assert_eq!(updated.max_hr, 190, "zone overrides leave max HR alone");

    // Visible through a fresh instance over the same directory
    let reopened = file_store_at(dir.path()).await?;
    let profile = reopened.get_profile("alice").await?;
    assert_eq!(profile.hr_zones, lab_zones());

    Ok(())
}

#[tokio::test]
async fn test_profiles_persist_across_instances() -> Result<()> {
    let dir = TempDir::new()?;

    let first = file_store_at(dir.path()).await?;
    let update = ProfileUpdate {
        max_hr: Some(175),
        actual_age: Some(41),
        ..ProfileUpdate::default()
    };
    first.update_parameters("alice", update).await?;
    drop(first);

    let second = file_store_at(dir.path()).await?;
    let profile = second.get_profile("alice").await?;
    assert_eq!(profile.max_hr, 175);
    assert_eq!(profile.actual_age, Some(41));
    assert_eq!(profile.hr_zones, calculate_zones(175));

    Ok(())
}

#[tokio::test]
async fn test_corrupt_profile_is_surfaced_as_error() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    let update = ProfileUpdate {
        max_hr: Some(182),
        ..ProfileUpdate::default()
    };
    storage.update_parameters("alice", update).await?;

    let documents = profile_documents(dir.path());
    assert_eq!(documents.len(), 1);
    std::fs::write(&documents[0], b"** not a profile **")?;

    // Profiles are user data: corruption is an error, never a silent reset
    let err = storage.get_profile("alice").await.unwrap_err();
    assert!(err.to_string().contains("unreadable"), "got: {err}");
    assert!(documents[0].exists(), "corrupt profile must not be deleted");

    Ok(())
}

#[tokio::test]
async fn test_hostile_user_ids_stay_inside_profile_dir() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = file_store_at(dir.path()).await?;

    let update = ProfileUpdate {
        max_hr: Some(170),
        ..ProfileUpdate::default()
    };
    storage
        .update_parameters("weird user@example.com/../x", update)
        .await?;

    let documents = profile_documents(dir.path());
    assert_eq!(documents.len(), 1);
    let name = documents[0].file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("user_"));
    assert!(name
        .trim_end_matches(".json")
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

    let profile = storage
        .get_profile("weird user@example.com/../x")
        .await?;
    assert_eq!(profile.max_hr, 170);

    Ok(())
}

#[tokio::test]
async fn test_memory_backend_shares_state_across_clones() -> Result<()> {
    common::init_test_logging();
    let storage = ProfileStorage::new(ProfileBackend::Memory, ProfileConfig::default()).await?;
    let clone = storage.clone();

    let update = ProfileUpdate {
        max_hr: Some(168),
        ..ProfileUpdate::default()
    };
    storage.update_parameters("alice", update).await?;

    let profile = clone.get_profile("alice").await?;
    assert_eq!(profile.max_hr, 168);
    assert_eq!(profile.hr_zones, calculate_zones(168));

    Ok(())
}
