use std::fmt;
use thiserror::Error;

/// The kind of record a lookup or uniqueness check was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Campus,
    Book,
    Officer,
    Student,
    Loan,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Campus => "Campus",
            EntityKind::Book => "Book",
            EntityKind::Officer => "Officer",
            EntityKind::Student => "Student",
            EntityKind::Loan => "Loan",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} with id {id} already exists")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Student {student} already holds {limit} books")]
    CapacityExceeded { student: String, limit: usize },

    #[error("Book {book} is not available")]
    Unavailable { book: String },

    #[error("Book {book} is on loan and cannot be removed")]
    BookOnLoan { book: String },

    #[error("Invalid administrator password")]
    AccessDenied,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl LibraryError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        LibraryError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn duplicate(kind: EntityKind, id: impl Into<String>) -> Self {
        LibraryError::DuplicateId {
            kind,
            id: id.into(),
        }
    }

    /// True for failures reading or writing the backing store.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            LibraryError::Io(_) | LibraryError::Serialization(_) | LibraryError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_kind() {
        let err = LibraryError::not_found(EntityKind::Student, "S9");
        assert_eq!(err.to_string(), "Student not found: S9");
    }

    #[test]
    fn persistence_grouping() {
        assert!(LibraryError::Store("disk full".into()).is_persistence());
        assert!(LibraryError::Io(std::io::Error::other("boom")).is_persistence());
        assert!(!LibraryError::AccessDenied.is_persistence());
        assert!(!LibraryError::Unavailable { book: "B1".into() }.is_persistence());
    }
}
