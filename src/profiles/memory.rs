// ABOUTME: In-memory profile store for tests and ephemeral deployments
// ABOUTME: Same update semantics as the file backend, nothing survives restart
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{apply_update, default_profile, ProfileConfig, ProfileStore};
use crate::errors::AppResult;
use crate::models::{HeartRateZone, ProfileUpdate, UserProfile};

/// In-memory profile store
///
/// Clones share one map. Reads of unknown users materialize the default
/// profile without inserting it, matching the file backend.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn new(_config: ProfileConfig) -> AppResult<Self> {
        Ok(Self::default())
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        Ok(self
            .profiles
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_else(default_profile))
    }

    async fn update_zones(
        &self,
        user_id: &str,
        zones: Vec<HeartRateZone>,
    ) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user_id.to_owned())
            .or_insert_with(default_profile);
        profile.hr_zones = zones;
        Ok(profile.clone())
    }

    async fn update_parameters(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(user_id.to_owned())
            .or_insert_with(default_profile);
        apply_update(profile, &update);
        Ok(profile.clone())
    }
}
