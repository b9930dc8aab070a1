//! cli
//!
//! Command-line interface layer for climdir.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that call into [`crate::core`]. All metadata semantics live in
//! [`crate::core::record`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// State shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output verbosity from `--quiet` / `--debug`
    pub verbosity: Verbosity,
    /// Loaded configuration (defaults when `--no-config`)
    pub config: Config,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let config = if cli.no_config {
        output::debug("Skipping config file (--no-config)", verbosity);
        Config::default()
    } else {
        Config::load().context("Failed to load config")?
    };
    if let Some(path) = config.path() {
        output::debug(format!("Loaded config from {}", path.display()), verbosity);
    }

    let ctx = Context { verbosity, config };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}
