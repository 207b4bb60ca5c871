//! # Data Model
//!
//! ```text
//! Library
//! └── Campus (name is the key)
//!     ├── Catalog ── Book (id unique per catalog)
//!     ├── Officer (id unique per campus)
//!     └── Student (id unique per campus)
//!         └── Loan ── book_id ──► Book in the same catalog
//! ```
//!
//! The library exclusively owns its campuses and each campus owns its
//! catalog, officers and students. Loans point at books by id rather than
//! holding a second copy, so a book's availability has one source of truth.
//!
//! The coupling maintained by every mutator: a book is unavailable exactly
//! when one student on its campus holds a loan for it.

use crate::error::{LibraryError, Result};

pub mod book;
pub mod campus;
pub mod catalog;
pub mod library;
pub mod user;

pub use book::{Book, BookDetails, SearchMode};
pub use campus::{Campus, LoanView};
pub use catalog::Catalog;
pub use library::{CampusSelector, Library, DEFAULT_CAMPUSES};
pub use user::{
    Inbox, Loan, NotificationLog, Officer, Profile, Student, User, LOAN_PERIOD_DAYS, MAX_BORROWED,
};

/// Trims `value`, rejecting it if nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::InvalidInput(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}
