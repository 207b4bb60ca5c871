use super::required;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The descriptive, editable part of a book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub category: String,
}

impl BookDetails {
    /// Builds details from raw user input. Every field is trimmed and must be non-empty.
    pub fn new(title: &str, author: &str, category: &str) -> Result<Self> {
        Ok(Self {
            title: required("title", title)?,
            author: required("author", author)?,
            category: required("category", category)?,
        })
    }
}

/// Which fields a free-text query is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Exact id, or title / category ignoring case.
    #[default]
    Full,
    /// Exact id, or category ignoring case.
    Shelf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: String,
    title: String,
    author: String,
    category: String,
    available: bool,
    // Informational only, never checked against the owning campus.
    campus: String,
}

impl Book {
    pub fn new(id: &str, details: BookDetails, campus: &str) -> Result<Self> {
        Ok(Self {
            id: required("book id", id)?,
            title: details.title,
            author: details.author,
            category: details.category,
            available: true,
            campus: campus.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn campus(&self) -> &str {
        &self.campus
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn details(&self) -> BookDetails {
        BookDetails {
            title: self.title.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
        }
    }

    /// Overwrites title, author and category. Id, availability and campus are kept.
    pub fn update_details(&mut self, details: BookDetails) {
        self.title = details.title;
        self.author = details.author;
        self.category = details.category;
    }

    /// Only the lending lifecycle (and the doctor repair) flips availability.
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn matches(&self, query: &str, mode: SearchMode) -> bool {
        if self.id == query {
            return true;
        }
        let query_lower = query.to_lowercase();
        let category_hit = self.category.to_lowercase() == query_lower;
        match mode {
            SearchMode::Shelf => category_hit,
            SearchMode::Full => category_hit || self.title.to_lowercase() == query_lower,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, author={}, category={} - {}",
            self.id,
            self.title,
            self.author,
            self.category,
            if self.available {
                "Available"
            } else {
                "Borrowed"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;

    fn book(id: &str, title: &str, category: &str) -> Book {
        let details = BookDetails::new(title, "Someone", category).unwrap();
        Book::new(id, details, "GC Campus").unwrap()
    }

    #[test]
    fn new_book_is_available() {
        let b = book("B1", "Intro to Algorithms", "CS");
        assert!(b.is_available());
        assert_eq!(b.campus(), "GC Campus");
    }

    #[test]
    fn details_are_trimmed_and_required() {
        let details = BookDetails::new("  Dune ", " Herbert", "SF  ").unwrap();
        assert_eq!(details.title, "Dune");
        assert_eq!(details.author, "Herbert");
        assert_eq!(details.category, "SF");

        let err = BookDetails::new("Dune", "   ", "SF").unwrap_err();
        assert!(matches!(err, LibraryError::InvalidInput(_)));
    }

    #[test]
    fn update_keeps_identity_and_availability() {
        let mut b = book("B1", "Old", "CS");
        b.set_available(false);
        b.update_details(BookDetails::new("New", "Author", "Math").unwrap());
        assert_eq!(b.id(), "B1");
        assert_eq!(b.title(), "New");
        assert_eq!(b.category(), "Math");
        assert!(!b.is_available());
    }

    #[test]
    fn id_matches_exactly_only() {
        let b = book("B1", "Dune", "SF");
        assert!(b.matches("B1", SearchMode::Full));
        assert!(!b.matches("b1", SearchMode::Full));
    }

    #[test]
    fn title_matches_only_in_full_mode() {
        let b = book("B1", "Dune", "SF");
        assert!(b.matches("dune", SearchMode::Full));
        assert!(!b.matches("dune", SearchMode::Shelf));
        assert!(b.matches("sf", SearchMode::Shelf));
    }

    #[test]
    fn display_shows_status() {
        let mut b = book("B1", "Dune", "SF");
        assert!(b.to_string().ends_with("Available"));
        b.set_available(false);
        assert!(b.to_string().ends_with("Borrowed"));
    }
}
