//! Borrowing and returning.
//!
//! A borrow stamps the loan with the time it was issued and a due date
//! [`LOAN_PERIOD_DAYS`](crate::model::LOAN_PERIOD_DAYS) later. Returns close
//! the loan and free the book but leave no entry in the student's log.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{CampusSelector, Library, LoanView};
use chrono::{DateTime, Local, Utc};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn borrow(
    library: &mut Library,
    campus: &CampusSelector,
    student_id: &str,
    book_id: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let campus = library.campus_mut(campus)?;
    let loan = campus.borrow(student_id.trim(), book_id.trim(), now)?;
    let book = campus.book(&loan.book_id)?.clone();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Borrowed {} ({}), due {}",
        book.title(),
        book.id(),
        loan.due_at.with_timezone(&Local).format(DUE_DATE_FORMAT)
    )));
    result.affected_books.push(book.clone());
    result.loans.push(LoanView {
        loan,
        book: Some(book),
    });
    Ok(result)
}

pub fn return_book(
    library: &mut Library,
    campus: &CampusSelector,
    student_id: &str,
    book_id: &str,
) -> Result<CmdResult> {
    let campus = library.campus_mut(campus)?;
    let loan = campus.return_book(student_id.trim(), book_id.trim())?;
    let book = campus.book(&loan.book_id)?.clone();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Returned {} ({})",
        book.title(),
        book.id()
    )));
    result.affected_books.push(book);
    Ok(result)
}

pub fn loans(library: &Library, campus: &CampusSelector, student_id: &str) -> Result<CmdResult> {
    let campus = library.campus(campus)?;
    let mut result = CmdResult::default();
    result.loans = campus.loans_of(student_id.trim())?;
    if result.loans.is_empty() {
        result.add_message(CmdMessage::info("No borrowed books."));
    }
    Ok(result)
}
