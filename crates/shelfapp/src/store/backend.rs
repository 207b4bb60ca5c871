use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw document I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `LibraryStore` handles the "what" (encoding, versioning, seeding).
pub trait StorageBackend {
    /// Read the whole stored document.
    /// Returns Ok(None) when nothing has been stored yet (first run).
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, contents: &str) -> Result<()>;

    /// Move an unreadable document aside so the next write cannot destroy it.
    /// Returns where it went, or None if there was nothing to move.
    fn quarantine(&self) -> Result<Option<PathBuf>>;

    /// Where the document lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
