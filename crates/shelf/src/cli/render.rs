use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use shelfapp::commands::{CampusSummary, CmdMessage, CmdResult, InboxView, MessageLevel};
use shelfapp::model::{Book, LoanView, Officer, Student, User};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 10;

pub(super) fn print_result(result: &CmdResult, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if !result.campuses.is_empty() {
        print_campuses(&result.campuses);
    }
    if !result.listed_books.is_empty() {
        print_books(&result.listed_books);
    }
    if !result.officers.is_empty() {
        print_officers(&result.officers);
    }
    if !result.students.is_empty() {
        print_students(&result.students);
    }
    if !result.loans.is_empty() {
        print_loans(&result.loans);
    }
    if let Some(inbox) = &result.inbox {
        print_inbox(inbox);
    }
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// Startup notices go to stderr so `--json` output stays parseable.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Info | MessageLevel::Success => {
                eprintln!("{}", message.content.dimmed())
            }
        }
    }
}

fn print_campuses(campuses: &[CampusSummary]) {
    for row in campuses {
        let counts = format!(
            "{} books ({} available), {} officers, {} students",
            row.books, row.available, row.officers, row.students
        );
        println!(
            "{:>3}. {}  {}",
            row.index,
            pad_to_width(&row.name, 28).bold(),
            counts.dimmed()
        );
    }
}

fn print_books(books: &[Book]) {
    let available = LINE_WIDTH.saturating_sub(ID_WIDTH + STATUS_WIDTH + 4);
    for book in books {
        let text = format!(
            "{} by {} [{}]",
            book.title(),
            book.author(),
            book.category()
        );
        let status = if book.is_available() {
            "Available".green()
        } else {
            "Borrowed".yellow()
        };
        println!(
            "  {} {} {}",
            pad_to_width(book.id(), ID_WIDTH).bold(),
            pad_to_width(&truncate_to_width(&text, available), available),
            status
        );
    }
}

fn print_officers(officers: &[Officer]) {
    for officer in officers {
        println!(
            "  {} {}  {}",
            pad_to_width(officer.id(), ID_WIDTH).bold(),
            officer.name(),
            officer.campus().dimmed()
        );
    }
}

fn print_students(students: &[Student]) {
    for student in students {
        let borrowed = format!("{} borrowed", student.loans().len());
        println!(
            "  {} {}  {}  {}",
            pad_to_width(student.id(), ID_WIDTH).bold(),
            student.name(),
            student.campus().dimmed(),
            borrowed.dimmed()
        );
    }
}

fn print_loans(loans: &[LoanView]) {
    for view in loans {
        let title = view
            .book
            .as_ref()
            .map(|b| b.title().to_string())
            .unwrap_or_else(|| "(missing from catalog)".to_string());
        let due = view.loan.due_at.with_timezone(&Local).format("%Y-%m-%d");
        println!(
            "  {} {}  due {}  {}",
            pad_to_width(&view.loan.book_id, ID_WIDTH).bold(),
            truncate_to_width(&title, 50),
            due.to_string().yellow(),
            format!("borrowed {}", format_time_ago(view.loan.issued_at)).dimmed()
        );
    }
}

fn print_inbox(inbox: &InboxView) {
    for entry in &inbox.entries {
        println!("  {}", entry);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
