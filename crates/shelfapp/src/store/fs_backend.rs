use super::backend::StorageBackend;
use crate::error::{LibraryError, Result};
use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> String {
        self.data_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "library_data.json".to_string())
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(LibraryError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.data_file) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LibraryError::Io(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        // Atomic write: tmp file in the same directory, then rename over the target
        let tmp_file = dir.join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, contents) {
            let _ = fs::remove_file(&tmp_file);
            return Err(LibraryError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_file, &self.data_file) {
            let _ = fs::remove_file(&tmp_file);
            return Err(LibraryError::Io(e));
        }

        tracing::debug!(
            path = %self.data_file.display(),
            bytes = contents.len(),
            "library saved"
        );
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let target = self
            .parent_dir()
            .join(format!("{}.corrupt-{}", self.file_name(), stamp));
        fs::rename(&self.data_file, &target).map_err(LibraryError::Io)?;
        Ok(Some(target))
    }

    fn location(&self) -> PathBuf {
        self.data_file.clone()
    }
}
