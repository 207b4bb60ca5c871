//! # CLI Behavior
//!
//! This is **one possible UI client** for shelf, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output formatting.
//!
//! ## Picking a Campus
//!
//! Most commands act on one campus, chosen with `--campus` (or `SHELF_CAMPUS`):
//! either its number from `shelf campuses` or its name, case-insensitively.
//! `notify --to-campus` reaches a student on a different campus.
//!
//! ## Administrative Commands
//!
//! `book add|remove|update` and `officer hire|fire` need `--password`
//! (or `SHELF_ADMIN_PASSWORD`).
//!
//! ## Output
//!
//! Human output is colored and width-aware. `--json` prints the raw
//! `CmdResult` instead; startup notices always go to stderr.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch from parsed arguments to the API
//! - `render`: output formatting (tables, colors, messages)
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
