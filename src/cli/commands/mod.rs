//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Converts command-specific arguments into core types
//! 2. Calls into [`crate::core`]
//! 3. Formats and displays output through [`crate::ui::output`]

mod completion;
mod generate;
mod parse;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use generate::{generate, GenerateRequest};
pub use parse::parse;

use super::args::Command;
use super::Context;
use anyhow::Result;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Parse {
            input,
            encoding,
            root,
            json,
        } => parse::parse(
            ctx,
            &input,
            encoding.map(Into::into),
            root.as_deref(),
            json,
        ),
        Command::Generate {
            to,
            from_cmor_fp,
            from_datanode_fp,
            from_cmor_fname,
            assignments,
            unset,
        } => {
            let request = GenerateRequest {
                to: to.into(),
                from_cmor_fp,
                from_datanode_fp,
                from_cmor_fname,
                assignments,
                unset,
            };
            let generated = generate::generate(ctx, &request)?;
            crate::ui::output::print(generated);
            Ok(())
        }
        Command::Completion { shell } => completion::completion(shell),
    }
}
