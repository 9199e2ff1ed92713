//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// flexbind - generate the C# binding surface of the flex layout library
///
/// Reads the bridgesupport metadata describing the native library (produced
/// by the introspection tool or supplied as a file) and writes a C# source
/// file with enums, P/Invoke declarations, delegates and the properties of
/// the wrapped item type.
#[derive(Parser, Debug)]
#[command(
    name = "flexbind",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FLEXBIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for informational output
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the C# binding source
    Generate(GenerateArgs),

    /// Load metadata and print a summary of the binding model
    Inspect(InspectArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Read metadata from this bridgesupport file instead of running the introspection tool
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["header", "keep_metadata"])]
    pub metadata: Option<PathBuf>,

    /// Header to introspect (overrides the configured header)
    #[arg(long, value_name = "FILE")]
    pub header: Option<PathBuf>,

    /// Destination of the generated source (overrides the configured output)
    #[arg(long, value_name = "PATH")]
    pub out_file: Option<PathBuf>,

    /// Write nothing; fail if the destination is not up to date
    #[arg(long, conflicts_with = "stdout")]
    pub check: bool,

    /// Print the generated source instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Keep the metadata produced by the introspection tool at this path
    #[arg(long, value_name = "PATH")]
    pub keep_metadata: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Bridgesupport metadata file to inspect
    #[arg(short, long, value_name = "FILE")]
    pub metadata: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
