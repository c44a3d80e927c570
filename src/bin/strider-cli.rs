// ABOUTME: Strider CLI - derives personal records and manages training profiles
// ABOUTME: Reads provider JSON exports, maintains the cache and per-user settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Derive personal records from an activities export
//! strider-cli records --input activities.json
//!
//! # Same, caching the result for a user (reruns serve the cached copy)
//! strider-cli records --input activities.json --user marathoner_42
//!
//! # Derive from detailed activities carrying best-effort splits
//! strider-cli efforts --input detailed.json --user marathoner_42 --refresh
//!
//! # Print the six training zones for a max heart rate (or an age)
//! strider-cli zones --max-hr 185
//! strider-cli zones --age 34
//!
//! # Show or update a user's training profile
//! strider-cli profile show --user marathoner_42
//! strider-cli profile set --user marathoner_42 --max-hr 180 --actual-age 34
//! strider-cli profile set-zones --user marathoner_42 --file zones.json
//!
//! # Drop every cached entry
//! strider-cli cache clear
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use strider::{
    cache::{Cache, CacheKey, CacheResource},
    config::environment::ServerConfig,
    intelligence::{calculate_zones, max_hr_from_age, personal_records::PersonalRecordsEngine},
    logging::LoggingConfig,
    models::{Activity, BestEffort, HeartRateZone, ProfileUpdate, RecordsByDistance},
    profiles::ProfileStorage,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "strider-cli",
    about = "Strider - personal records and training zones from activity data",
    long_about = "Derives personal-best records from provider activity exports and manages \
                  per-user heart rate configuration and the local result cache."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (holds cache entries and profiles)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Derive personal records from an activities JSON export
    Records {
        /// Path to a JSON array of activities
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// User to cache the derived records for (no caching when omitted)
        #[arg(long)]
        user: Option<String>,

        /// Discard any cached records and rederive
        #[arg(long)]
        refresh: bool,
    },

    /// Derive personal records from detailed activities with best-effort splits
    Efforts {
        /// Path to a JSON array of detailed activities
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// User to cache the derived records for (no caching when omitted)
        #[arg(long)]
        user: Option<String>,

        /// Discard any cached records and rederive
        #[arg(long)]
        refresh: bool,
    },

    /// Print heart rate training zones
    Zones {
        /// Maximum heart rate in BPM
        #[arg(long, conflicts_with = "age")]
        max_hr: Option<u32>,

        /// Derive max heart rate from age (220 - age)
        #[arg(long)]
        age: Option<u32>,
    },

    /// Show or update user training profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Show a user's profile (defaults if never saved)
    Show {
        /// User identifier
        #[arg(long)]
        user: String,
    },

    /// Update training parameters; zones are recomputed from max HR
    Set {
        /// User identifier
        #[arg(long)]
        user: String,

        /// New maximum heart rate in BPM
        #[arg(long)]
        max_hr: Option<u32>,

        /// New fitness age in years
        #[arg(long)]
        fitness_age: Option<u32>,

        /// New chronological age in years
        #[arg(long)]
        actual_age: Option<u32>,
    },

    /// Overwrite zones from a JSON file, bypassing the calculator
    SetZones {
        /// User identifier
        #[arg(long)]
        user: String,

        /// Path to a JSON array of zones ({"name", "min_bpm", "max_bpm"})
        #[arg(long)]
        file: PathBuf,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CacheCommand {
    /// Remove all cached entries
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Command::Records {
            input,
            user,
            refresh,
        } => {
            let activities: Vec<Activity> = read_json(&input)?;
            info!(count = activities.len(), "loaded activities export");

            let engine = PersonalRecordsEngine::with_config(config.records_config());
            let records = cached_records(&config, user.as_deref(), refresh, || {
                engine.records_from_activities(&activities)
            })
            .await?;
            print_json(&records)?;
        }
        Command::Efforts {
            input,
            user,
            refresh,
        } => {
            let activities: Vec<Activity> = read_json(&input)?;
            let groups: Vec<Vec<BestEffort>> = activities
                .into_iter()
                .filter_map(|a| a.best_efforts)
                .collect();
            info!(groups = groups.len(), "loaded best-effort groups");

            let engine = PersonalRecordsEngine::with_config(config.records_config());
            let records = cached_records(&config, user.as_deref(), refresh, || {
                engine.records_from_best_efforts(&groups)
            })
            .await?;
            print_json(&records)?;
        }
        Command::Zones { max_hr, age } => {
            let max_hr = match (max_hr, age) {
                (Some(bpm), _) => bpm,
                (None, Some(age)) => max_hr_from_age(age),
                (None, None) => bail!("provide --max-hr or --age"),
            };
            info!(max_hr, "calculating heart rate zones");
            print_json(&calculate_zones(max_hr))?;
        }
        Command::Profile { action } => {
            let storage = ProfileStorage::new(config.profiles.backend, config.profile_config())
                .await?;
            match action {
                ProfileCommand::Show { user } => {
                    print_json(&storage.get_profile(&user).await?)?;
                }
                ProfileCommand::Set {
                    user,
                    max_hr,
                    fitness_age,
                    actual_age,
                } => {
                    let update = ProfileUpdate {
                        max_hr,
                        fitness_age,
                        actual_age,
                    };
                    if update.is_empty() {
                        info!(user, "no parameters given; resyncing zones from stored max HR");
                    }
                    print_json(&storage.update_parameters(&user, update).await?)?;
                }
                ProfileCommand::SetZones { user, file } => {
                    let zones: Vec<HeartRateZone> = read_json(&file)?;
                    print_json(&storage.update_zones(&user, zones).await?)?;
                }
            }
        }
        Command::Cache { action } => match action {
            CacheCommand::Clear => {
                let cache = Cache::new(config.cache.backend, config.cache_config()).await?;
                cache.clear().await?;
                info!(backend = cache.backend_info(), "cache cleared");
            }
        },
    }

    Ok(())
}

/// Consult the per-user record cache around a derivation
///
/// Without a user there is nothing to key the cache by, so the closure runs
/// directly. A cached map is served as long as it is inside the default
/// freshness window for derived records; `--refresh` drops it first. Whatever
/// strategy produced the records last (whole activities or best efforts) owns
/// the cached value, which is the caller's call to make, not the engine's.
async fn cached_records(
    config: &ServerConfig,
    user: Option<&str>,
    refresh: bool,
    derive: impl FnOnce() -> RecordsByDistance,
) -> Result<RecordsByDistance> {
    let Some(user_id) = user else {
        return Ok(derive());
    };

    let cache = Cache::new(config.cache.backend, config.cache_config()).await?;
    let key = CacheKey::new(user_id, CacheResource::PersonalRecords);
    let max_age = CacheResource::PersonalRecords.default_max_age();

    if refresh {
        cache.delete(&key).await?;
    } else if let Some(records) = cache.get::<RecordsByDistance>(&key, max_age).await? {
        info!(user_id, "serving personal records from cache");
        return Ok(records);
    }

    let records = derive();
    cache.set(&key, &records).await?;
    info!(user_id, "personal records derived and cached");
    Ok(records)
}

/// Read and deserialize a JSON file, naming the file in any failure
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("failed to parse {}: {e}", path.display()))
}

/// Print a value as pretty JSON on stdout
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
