use super::book::{Book, BookDetails};
use super::catalog::Catalog;
use super::user::{Loan, Officer, Student, User};
use crate::error::{EntityKind, LibraryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One campus: its catalog, its officers and its registered students.
///
/// Ids are unique per campus and per list. The same id may be used by a
/// student on one campus and by an officer (or another student) elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    name: String,
    #[serde(rename = "books", default)]
    catalog: Catalog,
    #[serde(default)]
    officers: Vec<Officer>,
    #[serde(default)]
    students: Vec<Student>,
}

/// A student's loan joined with the catalog record it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanView {
    pub loan: Loan,
    pub book: Option<Book>,
}

impl Campus {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            catalog: Catalog::new(),
            officers: Vec::new(),
            students: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn officers(&self) -> &[Officer] {
        &self.officers
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    // --- Catalog ---

    pub fn add_book(&mut self, id: &str, details: BookDetails) -> Result<&Book> {
        let book = Book::new(id, details, &self.name)?;
        self.catalog.add(book)
    }

    /// Removes a book from the catalog. A book that is out on loan stays put.
    pub fn remove_book(&mut self, id: &str) -> Result<Book> {
        let book = self.book(id)?;
        if !book.is_available() || self.holder_of(id).is_some() {
            return Err(LibraryError::BookOnLoan {
                book: id.to_string(),
            });
        }
        self.catalog
            .remove(id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, id))
    }

    pub fn update_book(&mut self, id: &str, details: BookDetails) -> Result<&Book> {
        self.catalog
            .update(id, details)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, id))
    }

    pub fn book(&self, id: &str) -> Result<&Book> {
        self.catalog
            .find(id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, id))
    }

    /// The student currently holding `book_id`, if any.
    pub fn holder_of(&self, book_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.holds(book_id))
    }

    // --- Officers ---

    pub fn hire_officer(&mut self, id: &str, name: &str) -> Result<&Officer> {
        let officer = Officer::new(id, name, &self.name)?;
        if self.officers.iter().any(|o| o.id() == officer.id()) {
            return Err(LibraryError::duplicate(EntityKind::Officer, officer.id()));
        }
        self.officers.push(officer);
        Ok(&self.officers[self.officers.len() - 1])
    }

    /// Removes the officer and their notification history.
    pub fn fire_officer(&mut self, id: &str) -> Result<Officer> {
        let pos = self
            .officers
            .iter()
            .position(|o| o.id() == id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Officer, id))?;
        Ok(self.officers.remove(pos))
    }

    pub fn officer(&self, id: &str) -> Result<&Officer> {
        self.officers
            .iter()
            .find(|o| o.id() == id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Officer, id))
    }

    // --- Students ---

    pub fn register_student(&mut self, id: &str, name: &str) -> Result<&Student> {
        let student = Student::new(id, name, &self.name)?;
        if self.students.iter().any(|s| s.id() == student.id()) {
            return Err(LibraryError::duplicate(EntityKind::Student, student.id()));
        }
        self.students.push(student);
        Ok(&self.students[self.students.len() - 1])
    }

    pub fn student(&self, id: &str) -> Result<&Student> {
        self.students
            .iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Student, id))
    }

    pub fn student_mut(&mut self, id: &str) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Student, id))
    }

    // --- Lending ---

    /// Lends `book_id` to `student_id`. Checks run in order: the student
    /// exists, the student has room, the book exists, the book is available.
    pub fn borrow(&mut self, student_id: &str, book_id: &str, now: DateTime<Utc>) -> Result<Loan> {
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id() == student_id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Student, student_id))?;
        student.ensure_capacity()?;
        let book = self
            .catalog
            .find_mut(book_id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, book_id))?;
        student.borrow(book, now).cloned()
    }

    pub fn return_book(&mut self, student_id: &str, book_id: &str) -> Result<Loan> {
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id() == student_id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Student, student_id))?;
        let book = self
            .catalog
            .find_mut(book_id)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Book, book_id))?;
        student
            .return_book(book)
            .ok_or_else(|| LibraryError::not_found(EntityKind::Loan, book_id))
    }

    pub fn loans_of(&self, student_id: &str) -> Result<Vec<LoanView>> {
        let student = self.student(student_id)?;
        Ok(student
            .loans()
            .iter()
            .map(|loan| LoanView {
                loan: loan.clone(),
                book: self.catalog.find(&loan.book_id).cloned(),
            })
            .collect())
    }

    pub(crate) fn lending_parts_mut(&mut self) -> (&mut Catalog, &mut Vec<Student>) {
        (&mut self.catalog, &mut self.students)
    }
}
