//! # Startup
//!
//! [`initialize`] turns CLI-level options into a ready [`LibraryApi`]:
//!
//! 1. Find the config directory: `SHELF_CONFIG_DIR` if set (mostly for tests),
//!    else the OS config directory via `directories`.
//! 2. Load [`ShelfConfig`] from env, the explicit `--config` file and
//!    `shelf.toml` in that directory.
//! 3. Pick the data file: `--data` wins, then the configured `data_file`,
//!    then `library_data.json` in the OS data directory.
//! 4. Open the store. A missing file is seeded with the configured campuses;
//!    an unreadable one is moved aside and reported through
//!    [`ShelfContext::startup_messages`].

use crate::api::LibraryApi;
use crate::commands::CmdMessage;
use crate::config::ShelfConfig;
use crate::error::{LibraryError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::{FileStore, LoadOrigin};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct ShelfContext {
    pub api: LibraryApi<FsBackend>,
    pub config: ShelfConfig,
    pub data_file: PathBuf,
    pub origin: LoadOrigin,
}

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// `--data <file>`
    pub data_file: Option<PathBuf>,
    /// `--config <file>`
    pub config_file: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shelf", "shelf")
}

fn config_dir() -> Option<PathBuf> {
    std::env::var_os("SHELF_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| project_dirs().map(|dirs| dirs.config_dir().to_path_buf()))
}

/// Where the library lives, given the loaded config and an optional override.
pub fn resolve_data_file(config: &ShelfConfig, data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override.or_else(|| config.data_file.clone()) {
        return Ok(path);
    }
    let dirs = project_dirs().ok_or_else(|| {
        LibraryError::Config("could not determine a data directory; pass --data".to_string())
    })?;
    Ok(config.data_file_or(dirs.data_dir()))
}

pub fn initialize(options: &InitOptions) -> Result<ShelfContext> {
    let config_dir = config_dir();
    let config = ShelfConfig::load(options.config_file.as_deref(), config_dir.as_deref())?;
    let data_file = resolve_data_file(&config, options.data_file.clone())?;
    tracing::debug!(path = %data_file.display(), "using data file");

    let (api, origin) = LibraryApi::open(FileStore::at(&data_file), &config.campuses())?;
    Ok(ShelfContext {
        api,
        config,
        data_file,
        origin,
    })
}

impl ShelfContext {
    /// What the user should hear about how the library was loaded.
    pub fn startup_messages(&self) -> Vec<CmdMessage> {
        match &self.origin {
            LoadOrigin::Existing => Vec::new(),
            LoadOrigin::Seeded => vec![CmdMessage::info(format!(
                "Created a new library at {}",
                self.data_file.display()
            ))],
            LoadOrigin::Recovered { error, quarantined } => {
                let mut messages = vec![CmdMessage::warning(format!(
                    "Could not load {}: {}",
                    self.data_file.display(),
                    error
                ))];
                if let Some(path) = quarantined {
                    messages.push(CmdMessage::warning(format!(
                        "The unreadable file was kept at {}",
                        path.display()
                    )));
                }
                messages.push(CmdMessage::warning("Started a fresh library."));
                messages
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use std::fs;

    #[test]
    fn data_override_wins_over_config() {
        let config = ShelfConfig {
            data_file: Some(PathBuf::from("/from/config.json")),
            ..Default::default()
        };
        let path = resolve_data_file(&config, Some(PathBuf::from("/from/cli.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/from/cli.json"));

        let path = resolve_data_file(&config, None).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn initialize_seeds_then_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let options = InitOptions {
            data_file: Some(dir.path().join("library.json")),
            config_file: None,
        };

        let first = initialize(&options).unwrap();
        assert_eq!(first.origin, LoadOrigin::Seeded);
        assert_eq!(first.startup_messages().len(), 1);
        assert!(dir.path().join("library.json").exists());

        let second = initialize(&options).unwrap();
        assert_eq!(second.origin, LoadOrigin::Existing);
        assert!(second.startup_messages().is_empty());
    }

    #[test]
    fn explicit_config_seeds_its_campuses() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("shelf.toml");
        fs::write(&config_file, "campuses = [\"North\", \"South\"]\n").unwrap();

        let ctx = initialize(&InitOptions {
            data_file: Some(dir.path().join("library.json")),
            config_file: Some(config_file),
        })
        .unwrap();
        let names: Vec<_> = ctx
            .api
            .library()
            .campuses()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["North", "South"]);
    }

    #[test]
    fn unreadable_file_is_reported_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("library.json");
        fs::write(&data_file, "{ definitely not a library").unwrap();

        let ctx = initialize(&InitOptions {
            data_file: Some(data_file.clone()),
            config_file: None,
        })
        .unwrap();

        assert!(matches!(ctx.origin, LoadOrigin::Recovered { .. }));
        let messages = ctx.startup_messages();
        assert!(messages.iter().all(|m| m.level == MessageLevel::Warning));
        assert_eq!(messages.len(), 3);
        assert!(!ctx.api.library().is_empty());

        let kept: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".corrupt-"))
            .collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(
            fs::read_to_string(kept[0].path()).unwrap(),
            "{ definitely not a library"
        );
    }
}
