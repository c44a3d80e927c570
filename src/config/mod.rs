// ABOUTME: Configuration module for environment-driven runtime settings
// ABOUTME: Central place where env vars become typed config for storage and derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! All deployment-specific knobs enter through environment variables and are
//! parsed once into [`environment::ServerConfig`]; components receive typed
//! config structs from there rather than reading the environment themselves.

/// Environment-based configuration management
pub mod environment;

pub use environment::ServerConfig;
