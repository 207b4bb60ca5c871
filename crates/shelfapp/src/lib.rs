//! # shelfapp
//!
//! The core of shelf: a campus library's catalog, its officers and students,
//! and the borrow/return lifecycle between them, kept in one JSON file.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  UI (shelf)  │  parses args, renders CmdResult, picks exit codes
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    api.rs    │  LibraryApi: dispatch, write-through save, rollback
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  commands/   │  business operations over &Library / &mut Library
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐     ┌──────────┐
//! │    model/    │◄────┤  store/  │  whole-graph JSON document, atomic writes
//! └──────────────┘     └──────────┘
//! ```
//!
//! [`init`] wires these together from [`config`]; [`auth`] guards the
//! administrative operations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shelfapp::auth::verify_admin_password;
//! use shelfapp::init::{initialize, InitOptions};
//! use shelfapp::model::CampusSelector;
//!
//! # fn main() -> shelfapp::error::Result<()> {
//! let mut ctx = initialize(&InitOptions::default())?;
//! let gc: CampusSelector = "GC Campus".parse()?;
//! let admin = verify_admin_password("micky")?;
//!
//! ctx.api.add_book(&admin, &gc, "B1", "Intro to Algorithms", "X", "CS")?;
//! ctx.api.register_student(&gc, "S1", "Abebe")?;
//! ctx.api.borrow(&gc, "S1", "B1")?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
