// ABOUTME: Profile storage factory for environment-based backend selection
// ABOUTME: Enum dispatch over in-memory and file backends behind one interface
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{
    file::FileProfileStore, memory::InMemoryProfileStore, ProfileBackend, ProfileConfig,
    ProfileStore,
};
use crate::errors::AppResult;
use crate::models::{HeartRateZone, ProfileUpdate, UserProfile};

/// Profile storage wrapper that delegates to the configured backend
#[derive(Clone)]
pub enum ProfileStorage {
    /// In-memory backend
    Memory(InMemoryProfileStore),
    /// File-per-user backend
    File(FileProfileStore),
}

impl ProfileStorage {
    /// Create new profile storage for the selected backend
    ///
    /// # Errors
    ///
    /// Returns an error if store initialization fails
    pub async fn new(backend: ProfileBackend, config: ProfileConfig) -> AppResult<Self> {
        match backend {
            ProfileBackend::Memory => {
                tracing::info!("initializing in-memory profile store");
                Ok(Self::Memory(InMemoryProfileStore::new(config).await?))
            }
            ProfileBackend::File => {
                tracing::info!(dir = %config.profile_dir.display(), "initializing file profile store");
                Ok(Self::File(FileProfileStore::new(config).await?))
            }
        }
    }

    /// Descriptive string for the active backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "in-memory",
            Self::File(_) => "file (JSON document per user)",
        }
    }

    /// Get a user's profile, or the unsaved default if none exists
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails or a stored profile is
    /// unreadable
    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        match self {
            Self::Memory(store) => store.get_profile(user_id).await,
            Self::File(store) => store.get_profile(user_id).await,
        }
    }

    /// Overwrite a user's zones verbatim, bypassing the calculator
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    pub async fn update_zones(
        &self,
        user_id: &str,
        zones: Vec<HeartRateZone>,
    ) -> AppResult<UserProfile> {
        match self {
            Self::Memory(store) => store.update_zones(user_id, zones).await,
            Self::File(store) => store.update_zones(user_id, zones).await,
        }
    }

    /// Apply a partial parameter update and recompute zones from max HR
    ///
    /// # Errors
    ///
    /// Returns an error if storage access fails
    pub async fn update_parameters(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> AppResult<UserProfile> {
        match self {
            Self::Memory(store) => store.update_parameters(user_id, update).await,
            Self::File(store) => store.update_parameters(user_id, update).await,
        }
    }
}
