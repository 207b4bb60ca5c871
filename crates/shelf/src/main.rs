//! # shelf
//!
//! The terminal client for `shelfapp`. The binary is thin: the CLI lives in
//! `src/cli/`, while this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/shelf/src/cli/)                  │
//! │  - clap argument parsing (setup.rs)                 │
//! │  - context wiring + dispatch (commands.rs)          │
//! │  - terminal rendering (render.rs)                   │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │  API Layer (crates/shelfapp/src/api.rs)             │
//! │  - dispatches to command modules                    │
//! │  - saves after every change, rolls back on failure  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │  Command Layer (crates/shelfapp/src/commands/*)     │
//! │  - catalog, lending and notification rules          │
//! │  - no knowledge of stdout/stderr or process exits   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! Business rules are tested in `shelfapp`. Here, `setup.rs` checks argument
//! parsing, `render.rs` checks width handling, and `tests/cli_e2e.rs` drives
//! the real binary against a temporary data file.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
