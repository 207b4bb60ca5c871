//! # CLI Layer
//!
//! This module is **one possible UI client** for shelf; it is not the application itself.
//!
//! The CLI layer is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments become typed commands via clap
//! 2. **Context Setup**: [`initialize`] loads config and opens the library
//! 3. **API Dispatch**: each command calls one `LibraryApi` method
//! 4. **Output Formatting**: `CmdResult` is rendered as text or JSON
//! 5. **Error Handling**: errors bubble up to `main`, which prints them and exits 1

use super::render::{eprint_messages, print_result};
use super::setup::{
    AdminArgs, BookCommands, Cli, Commands, EditorArgs, OfficerCommands, StudentCommands,
};
use anyhow::{anyhow, Result};
use clap::Parser;
use shelfapp::api::LibraryApi;
use shelfapp::auth::{verify_admin_password, AdminGrant};
use shelfapp::commands::books::BookFilter;
use shelfapp::commands::CmdResult;
use shelfapp::init::{initialize, InitOptions};
use shelfapp::model::{CampusSelector, SearchMode};
use shelfapp::store::fs_backend::FsBackend;
use tracing_subscriber::{fmt, EnvFilter};

type Api = LibraryApi<FsBackend>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = initialize(&InitOptions {
        data_file: cli.data.clone(),
        config_file: cli.config.clone(),
    })?;
    eprint_messages(&ctx.startup_messages());

    let result = dispatch(&mut ctx.api, &cli)?;
    print_result(&result, cli.json)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("SHELF_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {}", e);
    }
}

fn dispatch(api: &mut Api, cli: &Cli) -> Result<CmdResult> {
    tracing::debug!(command = ?cli.command, campus = ?cli.campus, "dispatching");
    let result = match &cli.command {
        Commands::Campuses => api.campuses()?,
        Commands::Book(cmd) => handle_book(api, &campus(cli)?, cmd)?,
        Commands::Officer(cmd) => handle_officer(api, &campus(cli)?, cmd)?,
        Commands::Student(cmd) => handle_student(api, &campus(cli)?, cmd)?,
        Commands::Borrow { student, book } => api.borrow(&campus(cli)?, student, book)?,
        Commands::Return { student, book } => api.return_book(&campus(cli)?, student, book)?,
        Commands::Loans { student } => api.loans(&campus(cli)?, student)?,
        Commands::Notify {
            officer,
            student,
            message,
            to_campus,
        } => {
            let officer_campus = campus(cli)?;
            let student_campus = match to_campus {
                Some(sel) => sel.parse::<CampusSelector>()?,
                None => officer_campus.clone(),
            };
            api.notify(&officer_campus, officer, &student_campus, student, message)?
        }
        Commands::Inbox { student, officer } => match (student, officer) {
            (_, Some(officer)) => api.officer_inbox(&campus(cli)?, officer)?,
            (Some(student), None) => api.student_inbox(&campus(cli)?, student)?,
            (None, None) => return Err(anyhow!("inbox needs a student id or --officer <id>")),
        },
        Commands::Doctor => api.doctor()?,
    };
    Ok(result)
}

fn campus(cli: &Cli) -> Result<CampusSelector> {
    let raw = cli.campus.as_deref().ok_or_else(|| {
        anyhow!("no campus selected; pass --campus <number|name> (see `shelf campuses`)")
    })?;
    Ok(raw.parse()?)
}

fn admin(args: &AdminArgs) -> Result<AdminGrant> {
    Ok(verify_admin_password(&args.password)?)
}

fn handle_book(api: &mut Api, campus: &CampusSelector, cmd: &BookCommands) -> Result<CmdResult> {
    let result = match cmd {
        BookCommands::Add {
            id,
            title,
            author,
            category,
            admin: args,
        } => api.add_book(&admin(args)?, campus, id, title, author, category)?,
        BookCommands::Remove { id, admin: args } => api.remove_book(&admin(args)?, campus, id)?,
        BookCommands::Update {
            id,
            title,
            author,
            category,
            editor,
        } => update_book(api, campus, editor, id, title, author, category)?,
        BookCommands::Show { id } => api.show_book(campus, id)?,
        BookCommands::List {
            available,
            borrowed,
            by_category,
        } => {
            let filter = if *available {
                BookFilter::Available
            } else if *borrowed {
                BookFilter::Borrowed
            } else if *by_category {
                BookFilter::ByCategory
            } else {
                BookFilter::All
            };
            api.list_books(campus, filter)?
        }
        BookCommands::Search { query, shelf } => {
            let mode = if *shelf {
                SearchMode::Shelf
            } else {
                SearchMode::Full
            };
            api.search_books(campus, query, mode)?
        }
    };
    Ok(result)
}

/// An officer id takes precedence over a password, which may come from the
/// environment.
fn update_book(
    api: &mut Api,
    campus: &CampusSelector,
    editor: &EditorArgs,
    id: &str,
    title: &str,
    author: &str,
    category: &str,
) -> Result<CmdResult> {
    let result = match (&editor.officer, &editor.password) {
        (Some(officer), _) => {
            api.update_book_as_officer(campus, officer, id, title, author, category)?
        }
        (None, Some(password)) => {
            let grant = verify_admin_password(password)?;
            api.update_book(&grant, campus, id, title, author, category)?
        }
        (None, None) => return Err(anyhow!("book update needs --password or --officer <id>")),
    };
    Ok(result)
}

fn handle_officer(
    api: &mut Api,
    campus: &CampusSelector,
    cmd: &OfficerCommands,
) -> Result<CmdResult> {
    let result = match cmd {
        OfficerCommands::Hire {
            id,
            name,
            admin: args,
        } => api.hire_officer(&admin(args)?, campus, id, name)?,
        OfficerCommands::Fire { id, admin: args } => api.fire_officer(&admin(args)?, campus, id)?,
        OfficerCommands::Show { id } => api.show_officer(campus, id)?,
        OfficerCommands::List => api.list_officers(campus)?,
    };
    Ok(result)
}

fn handle_student(
    api: &mut Api,
    campus: &CampusSelector,
    cmd: &StudentCommands,
) -> Result<CmdResult> {
    let result = match cmd {
        StudentCommands::Register { id, name } => api.register_student(campus, id, name)?,
        StudentCommands::Show { id } => api.show_student(campus, id)?,
        StudentCommands::List => api.list_students(campus)?,
    };
    Ok(result)
}
