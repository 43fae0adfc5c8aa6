//! NeoWs configuration: API key and feed window.
//!
//! Values come from an optional JSON settings file in the platform config
//! directory, with the `NASA_API_KEY` environment variable taking precedence
//! for the credential:
//! - Linux: ~/.config/neo-impact/settings.json
//! - macOS: ~/Library/Application Support/neo-impact/settings.json
//! - Windows: %APPDATA%\neo-impact\config\settings.json

use bevy::prelude::*;
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::neo::error::NeoError;

pub const API_KEY_ENV: &str = "NASA_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";
/// NeoWs rejects feed windows longer than this.
pub const MAX_FEED_DAYS: i64 = 7;

/// Optional on-disk overrides. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub feed_start: Option<NaiveDate>,
    pub feed_end: Option<NaiveDate>,
}

impl SettingsFile {
    pub fn default_path() -> Result<PathBuf, anyhow::Error> {
        let proj_dirs = ProjectDirs::from("", "", "neo-impact")
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve config directory"))?;
        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Returns Ok(None) when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, anyhow::Error> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let settings: SettingsFile = serde_json::from_str(&contents)?;
        Ok(Some(settings))
    }
}

#[derive(Resource, Debug, Clone)]
pub struct NeoConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub feed_start: NaiveDate,
    pub feed_end: NaiveDate,
}

impl Default for NeoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            feed_start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
            feed_end: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap_or_default(),
        }
    }
}

impl NeoConfig {
    /// Merge defaults, the settings file and the environment key.
    pub fn resolve(file: Option<SettingsFile>, env_key: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(file) = file {
            if let Some(base_url) = file.base_url {
                config.base_url = base_url.trim_end_matches('/').to_string();
            }
            if let Some(start) = file.feed_start {
                config.feed_start = start;
            }
            if let Some(end) = file.feed_end {
                config.feed_end = end;
            }
            config.api_key = non_blank(file.api_key);
        }
        if let Some(key) = non_blank(env_key) {
            config.api_key = Some(key);
        }
        config
    }

    /// Load from the platform settings file and process environment.
    pub fn load() -> Self {
        let file = match SettingsFile::default_path().and_then(|path| SettingsFile::read(&path)) {
            Ok(file) => file,
            Err(err) => {
                warn!("[CONFIG] ignoring settings file: {}", err);
                None
            }
        };
        Self::resolve(file, std::env::var(API_KEY_ENV).ok())
    }

    pub fn api_key(&self) -> Result<&str, NeoError> {
        self.api_key.as_deref().ok_or(NeoError::MissingApiKey)
    }

    pub fn validate_feed_window(&self) -> Result<(), NeoError> {
        let span = self
            .feed_end
            .signed_duration_since(self.feed_start)
            .num_days();
        if !(0..=MAX_FEED_DAYS).contains(&span) {
            return Err(NeoError::InvalidFeedWindow {
                start: self.feed_start,
                end: self.feed_end,
                max_days: MAX_FEED_DAYS,
            });
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "neo-impact-settings-{}-{}-{}.json",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_use_june_2025_window() {
        let config = NeoConfig::resolve(None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.feed_start, date(2025, 6, 1));
        assert_eq!(config.feed_end, date(2025, 6, 8));
        assert!(matches!(config.api_key(), Err(NeoError::MissingApiKey)));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let file = SettingsFile {
            api_key: Some("FILE_KEY".to_string()),
            ..Default::default()
        };
        let config = NeoConfig::resolve(Some(file), Some("ENV_KEY".to_string()));
        assert_eq!(config.api_key().unwrap(), "ENV_KEY");
    }

    #[test]
    fn blank_env_key_keeps_file_key() {
        let file = SettingsFile {
            api_key: Some("FILE_KEY".to_string()),
            base_url: Some("http://localhost:8080/neo/rest/v1/".to_string()),
            ..Default::default()
        };
        let config = NeoConfig::resolve(Some(file), Some("   ".to_string()));
        assert_eq!(config.api_key().unwrap(), "FILE_KEY");
        assert_eq!(config.base_url, "http://localhost:8080/neo/rest/v1");
    }

    #[test]
    fn feed_window_validation() {
        let mut config = NeoConfig::default();
        assert!(config.validate_feed_window().is_ok());

        config.feed_end = date(2025, 6, 9);
        assert!(matches!(
            config.validate_feed_window(),
            Err(NeoError::InvalidFeedWindow { max_days: 7, .. })
        ));

        config.feed_end = date(2025, 5, 31);
        assert!(config.validate_feed_window().is_err());

        config.feed_end = config.feed_start;
        assert!(config.validate_feed_window().is_ok());
    }

    #[test]
    fn settings_file_roundtrip_and_miss() {
        let path = unique_temp_path("roundtrip");
        assert!(SettingsFile::read(&path).unwrap().is_none());

        let settings = SettingsFile {
            api_key: Some("abc".to_string()),
            base_url: None,
            feed_start: Some(date(2025, 1, 1)),
            feed_end: Some(date(2025, 1, 3)),
        };
        fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();
        let loaded = SettingsFile::read(&path).unwrap().unwrap();
        assert_eq!(loaded, settings);

        let config = NeoConfig::resolve(Some(loaded), None);
        assert_eq!(config.feed_start, date(2025, 1, 1));
        assert_eq!(config.feed_end, date(2025, 1, 3));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_settings_file_is_an_error() {
        let path = unique_temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert!(SettingsFile::read(&path).is_err());
        let _ = fs::remove_file(path);
    }
}
