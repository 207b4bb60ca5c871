use super::book::{Book, BookDetails, SearchMode};
use crate::error::{EntityKind, LibraryError, Result};
use serde::{Deserialize, Serialize};

/// The books of one campus, in insertion order.
///
/// The catalog is the only owner of [`Book`] values. Loans refer to books by
/// id, so there is exactly one copy of each record to mutate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a book, rejecting an id that is already catalogued.
    pub fn add(&mut self, book: Book) -> Result<&Book> {
        if self.find(book.id()).is_some() {
            return Err(LibraryError::duplicate(EntityKind::Book, book.id()));
        }
        self.books.push(book);
        Ok(&self.books[self.books.len() - 1])
    }

    /// Removes the book with `id`, returning it if there was one.
    pub fn remove(&mut self, id: &str) -> Option<Book> {
        let pos = self.books.iter().position(|b| b.id() == id)?;
        Some(self.books.remove(pos))
    }

    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id() == id)
    }

    /// Overwrites the descriptive fields of `id`. Returns `None` when absent.
    pub fn update(&mut self, id: &str, details: BookDetails) -> Option<&Book> {
        let book = self.find_mut(id)?;
        book.update_details(details);
        Some(&*book)
    }

    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// All books matching `query`, in catalog order.
    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<&Book> {
        self.books.iter().filter(|b| b.matches(query, mode)).collect()
    }

    pub fn available(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_available()).collect()
    }

    pub fn borrowed(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| !b.is_available()).collect()
    }

    /// Books sorted by category. The sort is stable, so ties keep catalog order.
    pub fn by_category(&self) -> Vec<&Book> {
        let mut sorted: Vec<&Book> = self.books.iter().collect();
        sorted.sort_by(|a, b| a.category().cmp(b.category()));
        sorted
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Book> {
        self.books.iter_mut()
    }
}
