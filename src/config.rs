use crate::model::style::Locale;
use crate::model::ui::{SortKey, ViewMode};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// User preferences read from `~/.srefs-tui/config.json`.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    /// Catalog file to browse instead of the bundled sample
    pub catalog_path: Option<PathBuf>,
    pub default_view: ViewMode,
    pub default_sort: SortKey,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    pub log_to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            catalog_path: None,
            default_view: ViewMode::Grid,
            default_sort: SortKey::Name,
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".srefs-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Directory for the rolling log files
    pub fn log_dir() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("logs"))
    }

    /// Load the user config; no home directory or no file means defaults
    pub fn load() -> anyhow::Result<Config> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "locale": "pl", "default_view": "list" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locale, Locale::Pl);
        assert_eq!(config.default_view, ViewMode::List);
        assert_eq!(config.default_sort, SortKey::Name);
        assert_eq!(config.log_level, "info");
        assert!(config.log_to_file);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "default_sort": "newest" }"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
