//! # Configuration
//!
//! Shelf configuration is a small [`confique`] struct loaded from layered
//! sources.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SHELF_DATA_FILE`.
//! 2. **Explicit file**: the CLI's `--config <file>`. It must exist.
//! 3. **User config**: `shelf.toml` in the OS config directory (via `directories`).
//!    Missing is fine; malformed is an error.
//! 4. **Compiled defaults**.
//!
//! The CLI's `--data <file>` flag is applied on top of all of these by
//! [`crate::init`].
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `<data dir>/library_data.json` | Where the library is stored |
//! | `campuses` | the five default campuses | Campuses seeded on first run |
//!
//! Campus names must be unique ignoring case and must not be plain numbers,
//! since `--campus 3` always means the third campus.

use crate::error::{LibraryError, Result};
use crate::model::DEFAULT_CAMPUSES;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "shelf.toml";
pub const DATA_FILE_NAME: &str = "library_data.json";

/// Configuration for shelf, stored in `shelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Path of the library data file.
    #[config(env = "SHELF_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Campus names created when no library has been saved yet.
    pub campuses: Option<Vec<String>>,
}

impl ShelfConfig {
    /// Loads env, then `explicit` (required), then `shelf.toml` in `config_dir`.
    pub fn load(explicit: Option<&Path>, config_dir: Option<&Path>) -> Result<Self> {
        let mut builder = ShelfConfig::builder().env();

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(LibraryError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.file(path);
        }
        if let Some(dir) = config_dir {
            builder = builder.file(dir.join(CONFIG_FILE_NAME));
        }

        let config = builder
            .load()
            .map_err(|e| LibraryError::Config(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Rejects campus names that a campus selector could not tell apart.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in self.campuses() {
            if name.parse::<usize>().is_ok() {
                return Err(LibraryError::Config(format!(
                    "campus name '{}' is a number and could not be selected by name",
                    name
                )));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(LibraryError::Config(format!(
                    "campus '{}' is listed more than once",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Campuses to seed, falling back to the defaults when unset or blank.
    pub fn campuses(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .campuses
            .iter()
            .flatten()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if configured.is_empty() {
            DEFAULT_CAMPUSES.iter().map(|s| s.to_string()).collect()
        } else {
            configured
        }
    }

    /// The configured data file, or [`DATA_FILE_NAME`] inside `default_dir`.
    pub fn data_file_or(&self, default_dir: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| default_dir.join(DATA_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_config_seeds_the_five_campuses() {
        let config = ShelfConfig::default();
        assert_eq!(config.campuses(), DEFAULT_CAMPUSES.to_vec());
    }

    #[test]
    fn blank_campus_names_are_ignored() {
        let config = ShelfConfig {
            campuses: Some(vec!["  ".into(), " North ".into()]),
            ..Default::default()
        };
        assert_eq!(config.campuses(), vec!["North"]);
    }

    #[test]
    fn empty_campus_list_falls_back_to_defaults() {
        let config = ShelfConfig {
            campuses: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(config.campuses().len(), 5);
    }

    #[test]
    fn data_file_defaults_into_given_dir() {
        let config = ShelfConfig::default();
        assert_eq!(
            config.data_file_or(Path::new("/var/shelf")),
            PathBuf::from("/var/shelf/library_data.json")
        );
    }

    #[test]
    fn loads_settings_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "data_file = \"/tmp/elsewhere.json\"\ncampuses = [\"North\", \"South\"]\n",
        )
        .unwrap();

        let config = ShelfConfig::load(None, Some(dir.path())).unwrap();
        assert_eq!(config.campuses(), vec!["North", "South"]);
        if std::env::var_os("SHELF_DATA_FILE").is_none() {
            assert_eq!(config.data_file, Some(PathBuf::from("/tmp/elsewhere.json")));
        }
    }

    #[test]
    fn missing_config_dir_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShelfConfig::load(None, Some(dir.path())).unwrap();
        assert!(config.campuses.is_none());
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShelfConfig::load(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, LibraryError::Config(_)));
    }

    #[test]
    fn explicit_file_wins_over_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "campuses = [\"Dir\"]\n").unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "campuses = [\"Explicit\"]\n").unwrap();

        let config = ShelfConfig::load(Some(&explicit), Some(dir.path())).unwrap();
        assert_eq!(config.campuses(), vec!["Explicit"]);
    }

    #[test]
    fn campus_names_differing_only_in_case_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "campuses = [\"North\", \" north\"]\n")
            .unwrap();
        let err = ShelfConfig::load(None, Some(dir.path())).unwrap_err();
        assert!(matches!(err, LibraryError::Config(m) if m.contains("more than once")));
    }

    #[test]
    fn numeric_campus_names_are_rejected() {
        let config = ShelfConfig {
            campuses: Some(vec!["North".into(), " 42 ".into()]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LibraryError::Config(_))));
    }

    #[test]
    fn default_campuses_are_valid() {
        assert!(ShelfConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "campuses = 42 [").unwrap();
        assert!(ShelfConfig::load(None, Some(dir.path())).is_err());
    }
}
