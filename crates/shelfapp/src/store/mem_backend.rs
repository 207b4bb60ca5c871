use super::backend::StorageBackend;
use crate::error::{LibraryError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the library is single-threaded.
/// This keeps `StorageBackend` on `&self` for every method.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    quarantined: RefCell<Vec<String>>,
    writes: RefCell<usize>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `contents` already stored, as if written by an earlier run.
    pub fn with_document(contents: &str) -> Self {
        let backend = Self::default();
        *backend.document.borrow_mut() = Some(contents.to_string());
        backend
    }

    /// Makes reads fail the way an unreadable file would.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn quarantined(&self) -> Vec<String> {
        self.quarantined.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(LibraryError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Simulated read error",
            )));
        }
        Ok(self.document.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(LibraryError::Store("Simulated write error".to_string()));
        }
        *self.document.borrow_mut() = Some(contents.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        match self.document.borrow_mut().take() {
            Some(doc) => {
                let mut quarantined = self.quarantined.borrow_mut();
                quarantined.push(doc);
                Ok(Some(PathBuf::from(format!(
                    "memory://library.corrupt-{}",
                    quarantined.len()
                ))))
            }
            None => Ok(None),
        }
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://library")
    }
}
