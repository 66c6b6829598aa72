// archgen-config/src/lib.rs
// ============================================================================
// Module: ArchGen Config
// Description: Canonical configuration model and validation.
// Purpose: Single place where ArchGen settings are parsed and bounded.
// Dependencies: archgen-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate owns the TOML configuration surface: the layout geometry
//! knobs consumed by `archgen-core`, the classifier defaults, and the cache
//! settings consumed by the CLI. Parsing is strict and fail-closed;
//! defaults are always valid.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ArchGenConfig;
pub use config::CacheConfig;
pub use config::ClassifierConfig;
pub use config::ConfigError;
pub use config::config_toml_example;
