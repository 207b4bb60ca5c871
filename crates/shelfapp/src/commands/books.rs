use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LibraryError, Result};
use crate::model::{Book, BookDetails, CampusSelector, Library, SearchMode};

/// Which slice of a catalog a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookFilter {
    #[default]
    All,
    Available,
    Borrowed,
    ByCategory,
}

pub fn add(
    library: &mut Library,
    campus: &CampusSelector,
    id: &str,
    details: BookDetails,
) -> Result<CmdResult> {
    let book = library.campus_mut(campus)?.add_book(id, details)?.clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book added: {} ({})",
        book.title(),
        book.id()
    )));
    Ok(result.with_affected_books(vec![book]))
}

pub fn remove(library: &mut Library, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
    let book = library.campus_mut(campus)?.remove_book(id.trim())?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book removed: {} ({})",
        book.title(),
        book.id()
    )));
    Ok(result.with_affected_books(vec![book]))
}

pub fn update(
    library: &mut Library,
    campus: &CampusSelector,
    id: &str,
    details: BookDetails,
) -> Result<CmdResult> {
    let book = library
        .campus_mut(campus)?
        .update_book(id.trim(), details)?
        .clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Book updated: {}", book.id())));
    Ok(result.with_affected_books(vec![book]))
}

/// Same as [`update`], authorized by an officer of the book's campus
/// instead of the administrator.
pub fn update_as_officer(
    library: &mut Library,
    campus: &CampusSelector,
    officer_id: &str,
    id: &str,
    details: BookDetails,
) -> Result<CmdResult> {
    let officer_id = officer_id.trim();
    library.campus(campus)?.officer(officer_id)?;
    tracing::debug!(officer = officer_id, book = id, "officer updating book");
    update(library, campus, id, details)
}

pub fn show(library: &Library, campus: &CampusSelector, id: &str) -> Result<CmdResult> {
    let book = library.campus(campus)?.book(id.trim())?.clone();
    Ok(CmdResult::default().with_listed_books(vec![book]))
}

pub fn list(library: &Library, campus: &CampusSelector, filter: BookFilter) -> Result<CmdResult> {
    let campus = library.campus(campus)?;
    let catalog = campus.catalog();
    let books: Vec<Book> = match filter {
        BookFilter::All => catalog.list_all().to_vec(),
        BookFilter::Available => catalog.available().into_iter().cloned().collect(),
        BookFilter::Borrowed => catalog.borrowed().into_iter().cloned().collect(),
        BookFilter::ByCategory => catalog.by_category().into_iter().cloned().collect(),
    };

    let mut result = CmdResult::default();
    if books.is_empty() {
        let what = match filter {
            BookFilter::Available => "No available books",
            BookFilter::Borrowed => "No borrowed books",
            BookFilter::All | BookFilter::ByCategory => "No books",
        };
        result.add_message(CmdMessage::info(format!("{} in {}.", what, campus.name())));
    }
    Ok(result.with_listed_books(books))
}

pub fn search(
    library: &Library,
    campus: &CampusSelector,
    query: &str,
    mode: SearchMode,
) -> Result<CmdResult> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LibraryError::InvalidInput(
            "search query cannot be empty".to_string(),
        ));
    }
    let books: Vec<Book> = library
        .campus(campus)?
        .catalog()
        .search(query, mode)
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if books.is_empty() {
        result.add_message(CmdMessage::info(format!("No books match '{}'.", query)));
    }
    Ok(result.with_listed_books(books))
}
