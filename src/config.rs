use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::{CalendarImportNormalizer, CanonicalCategory, DEFAULT_STATUS};
use crate::state::JsonFileStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub default_status: String,
    /// Zone used to read imported dates that have no offset
    pub timezone: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { default_status: DEFAULT_STATUS.to_string(), timezone: "UTC".to_string() }
    }
}

impl ImportConfig {
    pub fn normalizer(&self) -> Result<CalendarImportNormalizer> {
        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|e| anyhow!("Invalid import timezone '{}': {}", self.timezone, e))?;
        Ok(CalendarImportNormalizer::new().with_status(self.default_status.clone()).with_timezone(timezone))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub category_order: Vec<CanonicalCategory>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self { category_order: CanonicalCategory::ALL.to_vec() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    pub events_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn store(&self) -> Result<JsonFileStore> {
        match &self.events_file {
            Some(path) => Ok(JsonFileStore::new(path)),
            None => JsonFileStore::open_default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        // Surface a bad timezone at load time rather than on first import
        config.import.normalizer()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "campaign-toolkit", "campaign-toolkit")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.import.default_status, "Planned");
        assert_eq!(config.import.timezone, "UTC");
        assert_eq!(config.timeline.category_order, CanonicalCategory::ALL.to_vec());
        assert_eq!(config.storage.events_file, None);
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.import.timezone = "Europe/Amsterdam".to_string();
        config.timeline.category_order = vec![CanonicalCategory::Campaigns, CanonicalCategory::CategoryLed];
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[timeline]\ncategory_order = [\"Other Local Campaigns\"]\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.import, ImportConfig::default());
        assert_eq!(loaded.timeline.category_order, vec![CanonicalCategory::OtherLocalCampaigns]);
        Ok(())
    }

    #[test]
    fn test_invalid_timezone_is_rejected() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[import]\ntimezone = \"Mars/Olympus\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
        Ok(())
    }

    #[test]
    fn test_unknown_category_in_order_is_a_parse_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[timeline]\ncategory_order = [\"Seasonal\"]\n")?;

        assert!(Config::load_from(&config_path).is_err());
        Ok(())
    }
}
