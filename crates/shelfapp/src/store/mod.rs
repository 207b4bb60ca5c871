//! # Storage Layer
//!
//! The whole [`Library`] graph is persisted as one JSON document and replaced
//! wholesale on every save. There is no partial or incremental persistence.
//!
//! ## Split Responsibilities
//!
//! - [`backend::StorageBackend`]: raw document I/O ("how").
//!   - [`fs_backend::FsBackend`]: a single file, written atomically (tmp + rename).
//!   - [`mem_backend::MemBackend`]: in memory, for tests; can simulate write failures.
//! - [`LibraryStore`]: encoding, format versioning, and first-run seeding ("what").
//!
//! ## Document Format
//!
//! ```text
//! {
//!   "version": 1,
//!   "campuses": [
//!     {
//!       "name": "GC Campus",
//!       "books":    [ { "id", "title", "author", "category", "available", "campus" } ],
//!       "officers": [ { "id", "name", "campus", "notifications": [..] } ],
//!       "students": [ { "id", "name", "campus", "notifications": [..],
//!                       "borrowed": [ { "book_id", "issued_at", "due_at" } ] } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Loans store the book id, never a copy of the book, so loading needs no
//! re-linking step: the catalog entry is the only record of a book.
//!
//! ## Opening a Store
//!
//! [`LibraryStore::open`] distinguishes three outcomes:
//! 1. **Existing**: the document parsed and has campuses; use it.
//! 2. **Seeded**: nothing stored yet, or a document without campuses; create
//!    the configured campuses and save.
//! 3. **Recovered**: the document could not be parsed or has an unsupported
//!    format version. It is moved aside (never overwritten), the caller gets
//!    the error text to report, and a freshly seeded library is used.
//!
//! I/O failures while reading (permissions, a directory in place of the file)
//! are returned as errors and leave the file alone.

use crate::error::{LibraryError, Result};
use crate::model::Library;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;
use fs_backend::FsBackend;
use mem_backend::MemBackend;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    #[serde(flatten)]
    library: &'a Library,
}

#[derive(Deserialize)]
struct Document {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(flatten)]
    library: Library,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// How the library in an [`Opened`] came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    Existing,
    Seeded,
    Recovered {
        error: String,
        quarantined: Option<PathBuf>,
    },
}

#[derive(Debug)]
pub struct Opened {
    pub library: Library,
    pub origin: LoadOrigin,
}

pub struct LibraryStore<B: StorageBackend> {
    pub(crate) backend: B,
}

pub type FileStore = LibraryStore<FsBackend>;
pub type InMemoryStore = LibraryStore<MemBackend>;

impl FileStore {
    pub fn at(data_file: impl Into<PathBuf>) -> Self {
        LibraryStore::with_backend(FsBackend::new(data_file))
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        LibraryStore::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: StorageBackend> LibraryStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// Reads the stored library. `Ok(None)` means there is no prior state.
    pub fn load(&self) -> Result<Option<Library>> {
        let Some(raw) = self.backend.read()? else {
            tracing::debug!(path = %self.location().display(), "no stored library");
            return Ok(None);
        };
        let document: Document = serde_json::from_str(&raw)?;
        if document.version > FORMAT_VERSION {
            return Err(LibraryError::Store(format!(
                "unsupported data format version {} (expected at most {})",
                document.version, FORMAT_VERSION
            )));
        }
        tracing::debug!(
            path = %self.location().display(),
            bytes = raw.len(),
            campuses = document.library.campuses().len(),
            "library loaded"
        );
        Ok(Some(document.library))
    }

    /// Serializes the full graph and replaces whatever was stored.
    pub fn save(&self, library: &Library) -> Result<()> {
        let document = DocumentRef {
            version: FORMAT_VERSION,
            library,
        };
        let content = serde_json::to_string_pretty(&document)?;
        self.backend.write(&content)
    }

    /// Loads the stored library, or seeds one with `campus_names`.
    /// See the module docs for the three outcomes.
    pub fn open(&self, campus_names: &[String]) -> Result<Opened> {
        match self.load() {
            Ok(Some(library)) if !library.is_empty() => Ok(Opened {
                library,
                origin: LoadOrigin::Existing,
            }),
            Ok(_) => {
                let library = Library::with_campuses(campus_names);
                self.save(&library)?;
                tracing::info!(campuses = campus_names.len(), "seeded default campuses");
                Ok(Opened {
                    library,
                    origin: LoadOrigin::Seeded,
                })
            }
            Err(e @ (LibraryError::Serialization(_) | LibraryError::Store(_))) => {
                let quarantined = self.backend.quarantine()?;
                tracing::info!(
                    error = %e,
                    moved_to = ?quarantined,
                    "stored library unreadable, starting fresh"
                );
                let library = Library::with_campuses(campus_names);
                self.save(&library)?;
                Ok(Opened {
                    library,
                    origin: LoadOrigin::Recovered {
                        error: e.to_string(),
                        quarantined,
                    },
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookDetails, CampusSelector, User, DEFAULT_CAMPUSES};
    use chrono::Utc;

    fn campus_names() -> Vec<String> {
        DEFAULT_CAMPUSES.iter().map(|s| s.to_string()).collect()
    }

    fn populated_library() -> Library {
        let mut library = Library::seeded();
        let gc = library.campus_mut(&CampusSelector::Index(2)).unwrap();
        gc.add_book("B1", BookDetails::new("Intro", "X", "CS").unwrap()).unwrap();
        gc.add_book("B2", BookDetails::new("Calculus", "Y", "Math").unwrap()).unwrap();
        gc.hire_officer("O1", "Kebede").unwrap();
        gc.register_student("S1", "Abebe").unwrap();
        gc.borrow("S1", "B1", Utc::now()).unwrap();
        library
    }

    #[test]
    fn load_on_empty_backend_is_none() {
        let store = InMemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_is_observationally_equal() {
        let store = InMemoryStore::new();
        let library = populated_library();

        store.save(&library).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, library);
        let gc = loaded.campus(&CampusSelector::Index(2)).unwrap();
        assert!(!gc.book("B1").unwrap().is_available());
        assert!(gc.student("S1").unwrap().holds("B1"));
        assert_eq!(gc.student("S1").unwrap().notifications().len(), 1);
    }

    #[test]
    fn document_carries_format_version() {
        let store = InMemoryStore::new();
        store.save(&Library::seeded()).unwrap();
        let raw = store.backend().read().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["campuses"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let backend = MemBackend::with_document(r#"{"version": 99, "campuses": []}"#);
        let store = LibraryStore::with_backend(backend);
        assert!(matches!(store.load(), Err(LibraryError::Store(_))));
    }

    #[test]
    fn open_seeds_and_saves_on_first_run() {
        let store = InMemoryStore::new();
        let opened = store.open(&campus_names()).unwrap();

        assert_eq!(opened.origin, LoadOrigin::Seeded);
        assert_eq!(opened.library.campuses().len(), 5);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn open_uses_existing_document() {
        let store = InMemoryStore::new();
        let library = populated_library();
        store.save(&library).unwrap();

        let opened = store.open(&campus_names()).unwrap();
        assert_eq!(opened.origin, LoadOrigin::Existing);
        assert_eq!(opened.library, library);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn open_reseeds_a_document_without_campuses() {
        let backend = MemBackend::with_document(r#"{"version":1,"campuses":[]}"#);
        let store = LibraryStore::with_backend(backend);
        let opened = store.open(&["North".to_string()]).unwrap();

        assert_eq!(opened.origin, LoadOrigin::Seeded);
        assert_eq!(opened.library.campuses().len(), 1);
        assert_eq!(store.load().unwrap().unwrap(), opened.library);
        assert!(store.backend().quarantined().is_empty());
    }

    #[test]
    fn open_returns_read_errors_without_quarantining() {
        let store = LibraryStore::with_backend(MemBackend::with_document("{}"));
        store.backend().set_simulate_read_error(true);

        let err = store.open(&campus_names()).unwrap_err();
        assert!(matches!(err, LibraryError::Io(_)));
        assert!(store.backend().quarantined().is_empty());
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn open_recovers_from_garbage_without_losing_it() {
        let store = LibraryStore::with_backend(MemBackend::with_document("not json {"));
        let opened = store.open(&campus_names()).unwrap();

        match &opened.origin {
            LoadOrigin::Recovered { quarantined, .. } => assert!(quarantined.is_some()),
            other => panic!("expected Recovered, got {:?}", other),
        }
        assert_eq!(opened.library.campuses().len(), 5);
        assert_eq!(store.backend().quarantined(), vec!["not json {".to_string()]);
    }

    #[test]
    fn save_failure_surfaces_as_persistence_error() {
        let store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);
        let err = store.save(&Library::seeded()).unwrap_err();
        assert!(err.is_persistence());
    }
}
