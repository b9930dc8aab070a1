//! completion command - Shell completion scripts for climdir

use std::io::{self, Write};

use crate::cli::args::{Cli, Shell};
use anyhow::{Context as _, Result};
use clap::CommandFactory;

/// Print the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let mut out = io::stdout().lock();
    write_completion(shell, &mut out)?;
    out.flush().context("Failed to write completion script")
}

/// Write the completion script for `shell`, covering every subcommand,
/// encoding value and field flag.
pub fn write_completion(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(clap_complete::Shell::from(shell), &mut cmd, bin, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completion(shell, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_names_commands_and_flags() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("climdir"));
        assert!(bash.contains("generate"));
        assert!(bash.contains("--from-datanode-fp"));
        assert!(bash.contains("datanode-fp"));
    }

    #[test]
    fn every_shell_produces_a_script() {
        for shell in [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ] {
            assert!(!script(shell).is_empty(), "{shell:?}");
        }
    }
}
