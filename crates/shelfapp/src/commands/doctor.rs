//! Checks that book availability agrees with who holds what, campus by
//! campus, and repairs it when it does not.
//!
//! A healthy campus has every unavailable book held by exactly one student
//! and every loan pointing at a book in its own catalog. Repairs, in order:
//!
//! 1. Loans for books missing from the catalog are dropped.
//! 2. A book held by several students stays with the first holder found
//!    (student order, then loan order); the other loans are dropped.
//! 3. Held books marked available are marked borrowed.
//! 4. Unheld books marked borrowed are marked available.

use crate::commands::{CmdMessage, CmdResult};
use crate::model::Library;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub dangling_loans: usize,
    pub duplicate_loans: usize,
    pub relocked_books: usize,
    pub freed_books: usize,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.dangling_loans + self.duplicate_loans + self.relocked_books + self.freed_books
    }
}

pub fn repair(library: &mut Library) -> DoctorReport {
    let mut report = DoctorReport::default();

    for campus in library.campuses_mut() {
        let (catalog, students) = campus.lending_parts_mut();
        let mut held: HashSet<String> = HashSet::new();

        for student in students.iter_mut() {
            student.loans_mut().retain(|loan| {
                if catalog.find(&loan.book_id).is_none() {
                    report.dangling_loans += 1;
                    false
                } else if !held.insert(loan.book_id.clone()) {
                    report.duplicate_loans += 1;
                    false
                } else {
                    true
                }
            });
        }

        for book in catalog.iter_mut() {
            let is_held = held.contains(book.id());
            if is_held && book.is_available() {
                book.set_available(false);
                report.relocked_books += 1;
            } else if !is_held && !book.is_available() {
                book.set_available(true);
                report.freed_books += 1;
            }
        }
    }

    if !report.is_clean() {
        tracing::info!(?report, "doctor repaired library");
    }
    report
}

pub fn summarize(report: &DoctorReport) -> CmdResult {
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return result;
    }

    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    let lines = [
        (
            report.dangling_loans,
            "loan(s) for books missing from the catalog removed",
        ),
        (
            report.duplicate_loans,
            "loan(s) for books already held by another student removed",
        ),
        (
            report.relocked_books,
            "book(s) on loan marked as borrowed",
        ),
        (
            report.freed_books,
            "book(s) with no loan marked as available",
        ),
    ];
    for (count, what) in lines {
        if count > 0 {
            result.add_message(CmdMessage::info(format!("  - {} {}.", count, what)));
        }
    }
    result
}
