//! # Command Layer
//!
//! The business operations of shelf. Each area lives in its own submodule as
//! plain functions over [`Library`]: they take `&Library` to read and
//! `&mut Library` to change state, and know nothing about storage.
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: saving after a mutation is the API facade's job
//! - **Any I/O**: no stdout, stderr or terminal concerns
//! - **Argument parsing**: that belongs to the CLI
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. Records come back as the model
//! types themselves (books, officers, students, loans, inbox entries) next to
//! leveled [`CmdMessage`]s. The UI decides how to render both.
//!
//! ## Command Modules
//!
//! - [`books`]: catalog management, listings and search
//! - [`officers`]: hire, fire, look up officers
//! - [`students`]: register and look up students
//! - [`lending`]: borrow, return, list loans
//! - [`notify`]: officer-to-student notifications and inboxes
//! - [`campuses`]: the campus directory
//! - [`doctor`]: verify and repair the availability coupling

use crate::model::{Book, Campus, LoanView, Officer, Student};
use serde::Serialize;

pub mod books;
pub mod campuses;
pub mod doctor;
pub mod lending;
pub mod notify;
pub mod officers;
pub mod students;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One row of the campus directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampusSummary {
    /// 1-based, as accepted by `CampusSelector::Index`.
    pub index: usize,
    pub name: String,
    pub books: usize,
    pub available: usize,
    pub officers: usize,
    pub students: usize,
}

impl CampusSummary {
    pub fn of(index: usize, campus: &Campus) -> Self {
        Self {
            index,
            name: campus.name().to_string(),
            books: campus.catalog().len(),
            available: campus.catalog().available().len(),
            officers: campus.officers().len(),
            students: campus.students().len(),
        }
    }
}

/// Whose notification log an inbox belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboxView {
    pub owner: String,
    pub entries: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_books: Vec<Book>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listed_books: Vec<Book>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub officers: Vec<Officer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub students: Vec<Student>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub loans: Vec<LoanView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox: Option<InboxView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub campuses: Vec<CampusSummary>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }
}
