//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Suppress warnings
//! - `--no-config`: Ignore the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::extract::Encoding;

/// climdir - CMIP5 Data Reference Syntax metadata for file names and paths
#[derive(Parser, Debug)]
#[command(name = "climdir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Ignore the config file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract DRS metadata from a filename or path
    #[command(
        name = "parse",
        long_about = "Extract DRS metadata from a CMOR filename, a standard CMOR path, \
            or an extended datanode path.\n\n\
            Without --as, the encoding is guessed from the shape of the input: a bare \
            filename is a CMOR filename, a path with a version directory in the \
            third-from-last position is a datanode path, anything else is a standard \
            CMOR path.\n\n\
            Paths must start at the activity directory. Use --root to strip a \
            data root such as /badc/cmip5/data before parsing.",
        after_help = "\
EXAMPLES:
    # Show the metadata in a filename
    climdir parse tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc

    # Parse a path inside an archive
    climdir parse --root /badc/cmip5/data \\
        /badc/cmip5/data/CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/tas/r1i1p1/tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc

    # Force the datanode grammar and print JSON
    climdir parse --as datanode-fp --json \\
        CMIP5/output1/MOHC/HadGEM2-ES/rcp45/mon/atmos/Amon/r1i1p1/v20110101/tas/tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc"
    )]
    Parse {
        /// Filename or path to parse
        input: String,

        /// Encoding of the input (guessed when omitted)
        #[arg(long = "as", value_enum, value_name = "ENCODING")]
        encoding: Option<EncodingArg>,

        /// Data root to strip from the front of the input
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Print JSON instead of the text form
        #[arg(long)]
        json: bool,
    },

    /// Generate a filename or path from DRS metadata
    #[command(
        name = "generate",
        long_about = "Generate a CMOR filename, standard CMOR path, or datanode path.\n\n\
            Metadata is assembled in this order: fields extracted from the --from-* \
            source (at most one is used; standard path, then datanode path, then \
            filename), [defaults] from the config file for fields still unset, \
            --set values, then --unset. A --set with an empty value deletes the field.",
        after_help = "\
EXAMPLES:
    # Convert a datanode path to a standard CMOR path
    climdir generate --to cmor-fp --from-datanode-fp <PATH>

    # Rename a file to cover a different period
    climdir generate --to cmor-fname \\
        --from-cmor-fname tas_Amon_HadGEM2-ES_rcp45_r1i1p1_200601-210012.nc \\
        --set t_start=200001

    # Build a filename from scratch
    climdir generate --to cmor-fname --set variable_name=pr --set mip_table=day \\
        --set model=CanESM2 --set experiment=historical --set ensemble_member=r1i1p1"
    )]
    Generate {
        /// Encoding to generate
        #[arg(long, value_enum, value_name = "ENCODING")]
        to: EncodingArg,

        /// Extract starting metadata from a standard CMOR path
        #[arg(long, value_name = "PATH")]
        from_cmor_fp: Option<String>,

        /// Extract starting metadata from a datanode path
        #[arg(long, value_name = "PATH")]
        from_datanode_fp: Option<String>,

        /// Extract starting metadata from a CMOR filename
        #[arg(long, value_name = "FILENAME")]
        from_cmor_fname: Option<String>,

        /// Set a field (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Delete a field (repeatable)
        #[arg(long = "unset", value_name = "FIELD")]
        unset: Vec<String>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for climdir.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    climdir completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    climdir completion zsh >> ~/.zshrc

    # Fish
    climdir completion fish > ~/.config/fish/completions/climdir.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Encodings accepted on the command line
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingArg {
    /// CMOR filename
    CmorFname,
    /// Standard CMOR file path
    CmorFp,
    /// Extended datanode file path
    DatanodeFp,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::CmorFname => Encoding::CmorFname,
            EncodingArg::CmorFp => Encoding::CmorFp,
            EncodingArg::DatanodeFp => Encoding::DatanodeFp,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

/// Parse a `FIELD=VALUE` assignment. The value may be empty.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected FIELD=VALUE, got '{s}'")),
    }
}
