use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version)]
#[command(about = "Campus library catalog and lending tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Campus to act on, by number (see `shelf campuses`) or name
    #[arg(short, long, global = true, env = "SHELF_CAMPUS", help_heading = "Options")]
    pub campus: Option<String>,

    /// Library data file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Args)]
pub struct AdminArgs {
    /// Administrator password
    #[arg(long, env = "SHELF_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl fmt::Debug for AdminArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminArgs")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Who may edit a book: the administrator, or an officer of its campus.
#[derive(Args)]
pub struct EditorArgs {
    /// Administrator password
    #[arg(
        long,
        env = "SHELF_ADMIN_PASSWORD",
        hide_env_values = true,
        required_unless_present = "officer"
    )]
    pub password: Option<String>,

    /// Edit as this officer of the campus instead of the administrator
    #[arg(long, value_name = "ID")]
    pub officer: Option<String>,
}

impl fmt::Debug for EditorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorArgs")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("officer", &self.officer)
            .finish()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List campuses with their counts
    #[command(display_order = 1)]
    Campuses,

    /// Manage and browse the catalog
    #[command(subcommand, display_order = 2)]
    Book(BookCommands),

    /// Manage officers
    #[command(subcommand, display_order = 3)]
    Officer(OfficerCommands),

    /// Manage students
    #[command(subcommand, display_order = 4)]
    Student(StudentCommands),

    /// Lend a book to a student
    #[command(display_order = 10)]
    Borrow { student: String, book: String },

    /// Take a book back from a student
    #[command(display_order = 11)]
    Return { student: String, book: String },

    /// Show a student's borrowed books
    #[command(display_order = 12)]
    Loans { student: String },

    /// Send a notification from an officer to a student
    #[command(display_order = 20)]
    Notify {
        officer: String,
        student: String,

        /// Message text (quote it when it has spaces)
        message: String,

        /// Campus of the student, when it differs from --campus
        #[arg(long, value_name = "CAMPUS")]
        to_campus: Option<String>,
    },

    /// Show a student's (or an officer's) notifications
    #[command(display_order = 21)]
    Inbox {
        #[arg(required_unless_present = "officer")]
        student: Option<String>,

        #[arg(long, conflicts_with = "student")]
        officer: Option<String>,
    },

    /// Check and repair book availability against loans
    #[command(display_order = 30)]
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Add a book to the campus catalog
    Add {
        id: String,
        title: String,
        author: String,
        category: String,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Remove a book that is not on loan
    #[command(alias = "rm")]
    Remove {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Replace a book's title, author and category
    Update {
        id: String,
        title: String,
        author: String,
        category: String,
        #[command(flatten)]
        editor: EditorArgs,
    },

    /// Show one book
    Show { id: String },

    /// List books
    #[command(alias = "ls")]
    List {
        /// Only books on the shelf
        #[arg(long, conflicts_with_all = ["borrowed", "by_category"])]
        available: bool,

        /// Only books out on loan
        #[arg(long, conflicts_with_all = ["available", "by_category"])]
        borrowed: bool,

        /// Sort by category
        #[arg(long, conflicts_with_all = ["available", "borrowed"])]
        by_category: bool,
    },

    /// Find books by id, title or category
    Search {
        query: String,

        /// Match id or category only
        #[arg(long)]
        shelf: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum OfficerCommands {
    /// Hire an officer
    Hire {
        id: String,
        name: String,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Fire an officer
    Fire {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Show one officer
    Show { id: String },

    /// List officers
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Register a student
    Register { id: String, name: String },

    /// Show one student
    Show { id: String },

    /// List students
    #[command(alias = "ls")]
    List,
}
