//! Application settings loaded from config.toml
//!
//! Every table in the file is optional. A missing file gives the built-in
//! defaults, so a fresh checkout runs without any configuration.

use crate::{
    config::seed::SeedConfig,
    core::grading::GradingPolicy,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "gradingSystemData";

/// Config file used when `PORTAL_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Structure of the whole config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// `[storage]` table
    pub storage: StorageSettings,
    /// `[grading]` table
    pub grading: GradingPolicy,
    /// `[seed]` table
    pub seed: SeedConfig,
}

/// Where the portal blob lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Key of the row holding the serialized portal
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<AppSettings> {
    let settings: AppSettings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;
    if settings.storage.key.trim().is_empty() {
        return Err(Error::Config {
            message: "storage.key must not be empty".to_string(),
        });
    }
    Ok(settings)
}

/// Loads settings from a TOML file, falling back to defaults when the file
/// does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AppSettings> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppSettings::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    let settings = parse_settings(&contents)?;
    info!(path = %path.display(), key = %settings.storage.key, "Loaded settings");
    Ok(settings)
}

/// Path from `PORTAL_CONFIG`, or ./config.toml
#[must_use]
pub fn settings_path() -> PathBuf {
    std::env::var("PORTAL_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Loads settings from the default location.
pub fn load_default_settings() -> Result<AppSettings> {
    load_settings(settings_path())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::grading::GradingScale;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(settings.grading, GradingPolicy::default());
        assert!(settings.seed.sample_data);
    }

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [storage]
            key = "portal-test"

            [grading]
            scale = "table"
            passing_equivalent = 2.75

            [seed]
            sample_data = false
            admin_password = "changeme"
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.storage.key, "portal-test");
        assert_eq!(settings.grading.scale, GradingScale::Table);
        assert_eq!(settings.grading.passing_equivalent, 2.75);
        assert_eq!(settings.grading.passing_percentage, 75.0);
        assert!(!settings.seed.sample_data);
        assert_eq!(settings.seed.admin_password, "changeme");
        assert_eq!(settings.seed.teacher_password, "teacher123");
    }

    #[test]
    fn test_blank_storage_key_rejected() {
        let err = parse_settings("[storage]\nkey = \"  \"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_unknown_scale_rejected() {
        assert!(parse_settings("[grading]\nscale = \"curve\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = load_settings("does/not/exist/config.toml").unwrap();
        assert_eq!(settings.storage.key, DEFAULT_STORAGE_KEY);
    }
}
