//! Report configuration loaded from TOML.
//!
//! Every field has a default, so a missing file or a partial file both
//! work. Command-line flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use conflict_map_analytics_models::{BoundaryConfig, SummaryConfig};
use conflict_map_hotspot_models::HotspotConfig;
use serde::Deserialize;

/// Config file picked up from the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "conflict_map.toml";

/// Errors that can occur while loading the report config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`ReportConfig`].
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level report configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub hotspot: HotspotConfig,
    pub summary: SummaryConfig,
    pub boundaries: BoundaryConfig,
}

/// Parses a config from a TOML string.
///
/// # Errors
///
/// Returns the TOML error if the string is malformed or a field has the
/// wrong type.
pub fn parse_config(toml_str: &str) -> Result<ReportConfig, toml::de::Error> {
    toml::de::from_str(toml_str)
}

/// Loads the config from `path`, or from [`DEFAULT_CONFIG_FILE`] when it
/// exists, or falls back to defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if an explicitly requested or discovered file
/// cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                return Ok(ReportConfig::default());
            }
            default_path
        }
    };

    log::info!("Loading config from {}", path.display());

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    parse_config(&contents).map_err(|source| ConfigError::Parse { path, source })
}
