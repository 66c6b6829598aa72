// archgen-config/src/config.rs
// ============================================================================
// Module: ArchGen Configuration
// Description: Configuration loading and validation for ArchGen.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: archgen-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! `deny_unknown_fields` on every section. Every field has a default, so an
//! absent file yields the default config; a present but invalid file fails
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use archgen_core::LayoutConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "archgen.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "ARCHGEN_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 256 * 1024;
/// Upper bound on any single layout dimension, in canvas units.
pub(crate) const MAX_LAYOUT_DIMENSION: u32 = 10_000;
/// Maximum total path length for the cache directory.
pub(crate) const MAX_CACHE_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Top-level ArchGen configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ArchGenConfig {
    /// Layout geometry knobs.
    pub layout: LayoutConfig,
    /// Keyword classifier settings.
    pub classifier: ClassifierConfig,
    /// Diagram cache settings.
    pub cache: CacheConfig,
}

/// Keyword classifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ClassifierConfig {
    /// Source id selected when no keyword matches the prompt.
    pub default_source: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_source: "oracle_db".to_string(),
        }
    }
}

/// Diagram cache settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CacheConfig {
    /// Enables the on-disk document cache.
    pub enabled: bool,
    /// Cache directory. Required when the cache is enabled.
    pub dir: Option<PathBuf>,
}

impl ArchGenConfig {
    /// Loads configuration from `path`, the `ARCHGEN_CONFIG` environment
    /// variable, or `archgen.toml`, in that order. A missing file is not an
    /// error; it yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        if !resolved.exists() && path.is_none() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all sections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any field is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_layout(&self.layout)?;
        self.classifier.validate()?;
        self.cache.validate()
    }
}

impl ClassifierConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_source.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "classifier.default_source must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl CacheConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        let Some(dir) = &self.dir else {
            return Err(ConfigError::Invalid("cache.dir must be set when cache.enabled".to_string()));
        };
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("cache.dir must not be empty".to_string()));
        }
        if dir.to_string_lossy().len() > MAX_CACHE_PATH_LENGTH {
            return Err(ConfigError::Invalid("cache.dir exceeds max length".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Example Generation
// ============================================================================

/// Renders a commented example `archgen.toml`.
///
/// The body is serialized from [`ArchGenConfig::default`], so the example
/// cannot drift from the config model.
#[must_use]
pub fn config_toml_example() -> String {
    let body = toml::to_string_pretty(&ArchGenConfig::default()).unwrap_or_default();
    format!(
        "# archgen.toml\n\
         # Every field is optional; absent fields fall back to these defaults.\n\
         # Dimensions are canvas units. cache.dir is required when cache.enabled.\n\
         \n\
         {body}"
    )
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(env_path);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}

/// Bounds checks for the layout section. Zero-sized nodes and runaway
/// dimensions both fail.
fn validate_layout(layout: &LayoutConfig) -> Result<(), ConfigError> {
    let positive = [
        ("layout.node_w", layout.node_w),
        ("layout.node_h", layout.node_h),
        ("layout.label_h", layout.label_h),
    ];
    for (name, value) in positive {
        if value == 0 {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }
    }
    let bounded = [
        ("layout.node_w", layout.node_w),
        ("layout.node_h", layout.node_h),
        ("layout.cell_gap", layout.cell_gap),
        ("layout.zone_pad", layout.zone_pad),
        ("layout.label_h", layout.label_h),
        ("layout.zone_gap", layout.zone_gap),
        ("layout.column_gap", layout.column_gap),
        ("layout.margin", layout.margin),
    ];
    for (name, value) in bounded {
        if value > MAX_LAYOUT_DIMENSION {
            return Err(ConfigError::Invalid(format!("{name} exceeds {MAX_LAYOUT_DIMENSION}")));
        }
    }
    Ok(())
}
