// ABOUTME: File-backed profile store with one JSON document per user
// ABOUTME: Defaults are materialized on read and only persisted by explicit updates
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;

use super::{apply_update, default_profile, ProfileConfig, ProfileStore};
use crate::errors::{AppError, AppResult};
use crate::models::{HeartRateZone, ProfileUpdate, UserProfile};

/// File-backed profile store, one `user_{id}.json` document per user
///
/// Unlike the cache, a profile that fails to parse is surfaced as an error
/// rather than silently replaced: this is user data, not rederivable state.
#[derive(Clone)]
pub struct FileProfileStore {
    profile_dir: PathBuf,
}

impl FileProfileStore {
    fn profile_path(&self, user_id: &str) -> PathBuf {
        let safe_id: String = user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.profile_dir.join(format!("user_{safe_id}.json"))
    }

    /// Load a stored profile, `None` when the user has never saved one
    async fn load(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let path = self.profile_path(user_id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::storage(format!("failed to read profile: {e}"))
                    .with_user_id(user_id)
                    .with_resource_id(path.display().to_string()));
            }
        };

        let profile = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::serialization(format!("stored profile is unreadable: {e}"))
                .with_user_id(user_id)
                .with_resource_id(path.display().to_string())
        })?;
        Ok(Some(profile))
    }

    async fn save(&self, user_id: &str, profile: &UserProfile) -> AppResult<()> {
        let path = self.profile_path(user_id);
        fs::write(&path, serde_json::to_vec_pretty(profile)?)
            .await
            .map_err(|e| {
                AppError::storage(format!("failed to write profile: {e}"))
                    .with_user_id(user_id)
                    .with_resource_id(path.display().to_string())
            })?;
        tracing::debug!(user_id, path = %path.display(), "profile saved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileStore for FileProfileStore {
    async fn new(config: ProfileConfig) -> AppResult<Self> {
        fs::create_dir_all(&config.profile_dir).await.map_err(|e| {
            AppError::storage(format!(
                "failed to create profile directory {}: {e}",
                config.profile_dir.display()
            ))
        })?;

        Ok(Self {
            profile_dir: config.profile_dir,
        })
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        Ok(self.load(user_id).await?.unwrap_or_else(default_profile))
    }

    async fn update_zones(
        &self,
        user_id: &str,
        zones: Vec<HeartRateZone>,
    ) -> AppResult<UserProfile> {
        let mut profile = self.get_profile(user_id).await?;
        profile.hr_zones = zones;
        self.save(user_id, &profile).await?;
        Ok(profile)
    }

    async fn update_parameters(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let mut profile = self.get_profile(user_id).await?;
        apply_update(&mut profile, &update);
        self.save(user_id, &profile).await?;
        Ok(profile)
    }
}
