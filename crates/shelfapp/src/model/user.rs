//! Students, officers, and the notification log they share.
//!
//! Both roles carry a [`Profile`] (identity plus notification log) and expose
//! it through the [`User`] trait. A student additionally owns a bounded list of
//! [`Loan`]s; an officer owns nothing beyond the ability to notify a student.
//!
//! ## Borrowing Rules
//!
//! - A student holds at most [`MAX_BORROWED`] books.
//! - A book is lent only while it is available; lending flips it to borrowed,
//!   returning flips it back. Nothing else touches availability.
//! - Loans are due [`LOAN_PERIOD_DAYS`] calendar days after issue. There is no
//!   renewal and no overdue handling.
//! - Borrowing appends `Borrowed book: <title>` to the student's log.
//!   Returning does not.

use super::book::Book;
use super::required;
use crate::error::{LibraryError, Result};
use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_BORROWED: usize = 5;
pub const LOAN_PERIOD_DAYS: i64 = 14;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Append-only, timestamped messages for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationLog {
    entries: Vec<String>,
}

/// What a user sees when opening their notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbox<'a> {
    Empty,
    Entries(&'a [String]),
}

impl NotificationLog {
    pub fn push(&mut self, message: &str) {
        self.push_at(message, Local::now());
    }

    pub fn push_at(&mut self, message: &str, at: DateTime<Local>) {
        self.entries
            .push(format!("{} - {}", at.format(TIMESTAMP_FORMAT), message));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn inbox(&self) -> Inbox<'_> {
        if self.entries.is_empty() {
            Inbox::Empty
        } else {
            Inbox::Entries(&self.entries)
        }
    }
}

/// Identity shared by every role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub campus: String,
    #[serde(default)]
    pub notifications: NotificationLog,
}

impl Profile {
    pub fn new(id: &str, name: &str, campus: &str) -> Result<Self> {
        Ok(Self {
            id: required("id", id)?,
            name: required("name", name)?,
            campus: campus.to_string(),
            notifications: NotificationLog::default(),
        })
    }
}

pub trait User {
    fn profile(&self) -> &Profile;

    fn profile_mut(&mut self) -> &mut Profile;

    fn id(&self) -> &str {
        &self.profile().id
    }

    fn name(&self) -> &str {
        &self.profile().name
    }

    fn campus(&self) -> &str {
        &self.profile().campus
    }

    fn notify(&mut self, message: &str) {
        self.profile_mut().notifications.push(message);
    }

    fn notifications(&self) -> &NotificationLog {
        &self.profile().notifications
    }
}

/// An active borrow: which book, when it went out, when it is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub book_id: String,
    pub issued_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
}

pub fn loan_period() -> Duration {
    Duration::days(LOAN_PERIOD_DAYS)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(flatten)]
    profile: Profile,
    #[serde(default)]
    borrowed: Vec<Loan>,
}

impl Student {
    pub fn new(id: &str, name: &str, campus: &str) -> Result<Self> {
        Ok(Self {
            profile: Profile::new(id, name, campus)?,
            borrowed: Vec::new(),
        })
    }

    pub fn loans(&self) -> &[Loan] {
        &self.borrowed
    }

    pub fn loan(&self, book_id: &str) -> Option<&Loan> {
        self.borrowed.iter().find(|l| l.book_id == book_id)
    }

    pub fn holds(&self, book_id: &str) -> bool {
        self.loan(book_id).is_some()
    }

    pub fn ensure_capacity(&self) -> Result<()> {
        if self.borrowed.len() >= MAX_BORROWED {
            return Err(LibraryError::CapacityExceeded {
                student: self.profile.id.clone(),
                limit: MAX_BORROWED,
            });
        }
        Ok(())
    }

    /// Lends `book` for the standard loan period starting at `issued_at`.
    pub fn borrow(&mut self, book: &mut Book, issued_at: DateTime<Utc>) -> Result<&Loan> {
        self.borrow_until(book, issued_at, issued_at + loan_period())
    }

    pub fn borrow_until(
        &mut self,
        book: &mut Book,
        issued_at: DateTime<Utc>,
        due_at: DateTime<Utc>,
    ) -> Result<&Loan> {
        self.ensure_capacity()?;
        if !book.is_available() {
            return Err(LibraryError::Unavailable {
                book: book.id().to_string(),
            });
        }

        book.set_available(false);
        self.borrowed.push(Loan {
            book_id: book.id().to_string(),
            issued_at,
            due_at,
        });
        self.profile.notifications.push_at(
            &format!("Borrowed book: {}", book.title()),
            issued_at.with_timezone(&Local),
        );
        Ok(&self.borrowed[self.borrowed.len() - 1])
    }

    /// Gives `book` back. Returns the closed loan, or `None` if this student
    /// did not hold it (in which case nothing changes).
    pub fn return_book(&mut self, book: &mut Book) -> Option<Loan> {
        let pos = self.borrowed.iter().position(|l| l.book_id == book.id())?;
        let loan = self.borrowed.remove(pos);
        book.set_available(true);
        Some(loan)
    }

    pub(crate) fn loans_mut(&mut self) -> &mut Vec<Loan> {
        &mut self.borrowed
    }
}

impl User for Student {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    #[serde(flatten)]
    profile: Profile,
}

impl Officer {
    pub fn new(id: &str, name: &str, campus: &str) -> Result<Self> {
        Ok(Self {
            profile: Profile::new(id, name, campus)?,
        })
    }

    /// Delivers `message` to the student's log. The officer keeps no record,
    /// and the student may belong to any campus.
    pub fn send_notification(&self, student: &mut Student, message: &str) {
        student.notify(message);
    }
}

impl User for Officer {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }
}
