//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Scan the module and write the annotation registry
//! - `clean`: Remove every generated registry directory
//! - `scan`: Show what the scanner extracts, without writing anything
//! - `config`: Manage import alias overrides

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::generate::{DEFAULT_OUTPUT_DIR, render::DEFAULT_RUNTIME_IMPORT};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Module root directory (holds go.mod)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Alias configuration file or http(s) URL [default: <root>/.ann/ann.yml]
    #[arg(long, global = true, env = "ANN_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Output directory, relative to the module root
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Import path of the runtime package providing core.Element
    #[arg(long, default_value = DEFAULT_RUNTIME_IMPORT)]
    pub runtime: String,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Print the scanned files as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Add extra aliases for an import path
    Add {
        import_path: String,
        #[arg(required = true)]
        aliases: Vec<String>,
    },
    /// Remove aliases for an import path (all of them when none are given)
    Remove {
        import_path: String,
        aliases: Vec<String>,
    },
    /// Show the configured aliases
    List,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the annotation registry
    Generate(GenerateArgs),
    /// Remove all generated registry directories under the root
    Clean,
    /// Print the declarations and annotations found under the root
    Scan(ScanArgs),
    /// Manage import alias overrides
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}
