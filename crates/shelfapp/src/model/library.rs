use super::campus::Campus;
use super::user::User;
use crate::error::{EntityKind, LibraryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Campuses created when there is no saved state.
pub const DEFAULT_CAMPUSES: [&str; 5] = [
    "Atse Tewodros Campus",
    "GC Campus",
    "Maraki Campus",
    "Fasil Campus",
    "Teda Campus",
];

/// How a caller picks a campus: by its 1-based position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampusSelector {
    Index(usize),
    Name(String),
}

impl FromStr for CampusSelector {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LibraryError::InvalidInput(
                "campus selector cannot be empty".to_string(),
            ));
        }
        match trimmed.parse::<usize>() {
            Ok(0) => Err(LibraryError::InvalidInput(
                "campus numbers start at 1".to_string(),
            )),
            Ok(n) => Ok(CampusSelector::Index(n)),
            Err(_) => Ok(CampusSelector::Name(trimmed.to_string())),
        }
    }
}

impl fmt::Display for CampusSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampusSelector::Index(n) => write!(f, "{}", n),
            CampusSelector::Name(name) => f.write_str(name),
        }
    }
}

/// The root of the object graph and the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    campuses: Vec<Campus>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_campuses<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            campuses: names
                .into_iter()
                .map(|name| Campus::new(name.as_ref()))
                .collect(),
        }
    }

    pub fn seeded() -> Self {
        Self::with_campuses(DEFAULT_CAMPUSES)
    }

    pub fn campuses(&self) -> &[Campus] {
        &self.campuses
    }

    pub fn is_empty(&self) -> bool {
        self.campuses.is_empty()
    }

    /// Resolves a selector to a position in the campus list.
    pub fn position(&self, selector: &CampusSelector) -> Result<usize> {
        let found = match selector {
            CampusSelector::Index(n) if *n >= 1 && *n <= self.campuses.len() => Some(n - 1),
            CampusSelector::Index(_) => None,
            CampusSelector::Name(name) => {
                let wanted = name.to_lowercase();
                self.campuses
                    .iter()
                    .position(|c| c.name().to_lowercase() == wanted)
            }
        };
        found.ok_or_else(|| LibraryError::not_found(EntityKind::Campus, selector.to_string()))
    }

    pub fn campus(&self, selector: &CampusSelector) -> Result<&Campus> {
        let pos = self.position(selector)?;
        Ok(&self.campuses[pos])
    }

    pub fn campus_mut(&mut self, selector: &CampusSelector) -> Result<&mut Campus> {
        let pos = self.position(selector)?;
        Ok(&mut self.campuses[pos])
    }

    pub(crate) fn campuses_mut(&mut self) -> &mut [Campus] {
        &mut self.campuses
    }

    /// Has an officer of one campus notify a student of any campus.
    pub fn send_notification(
        &mut self,
        officer_campus: &CampusSelector,
        officer_id: &str,
        student_campus: &CampusSelector,
        student_id: &str,
        message: &str,
    ) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LibraryError::InvalidInput(
                "message cannot be empty".to_string(),
            ));
        }
        let officer = self.campus(officer_campus)?.officer(officer_id)?.clone();
        let student = self.campus_mut(student_campus)?.student_mut(student_id)?;
        officer.send_notification(student, message);
        tracing::debug!(
            officer = officer.id(),
            student = student_id,
            "notification delivered"
        );
        Ok(())
    }
}
