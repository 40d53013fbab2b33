//! CLI definitions for formaudit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// formaudit CLI.
#[derive(Parser)]
#[command(name = "formaudit")]
#[command(about = "Structural and semantic audits for HTML forms")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to the user config directory)
    #[arg(short, long, global = true, env = "FORMAUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Audit a captured tree saved as JSON
    Audit {
        /// TreeNode JSON file, `-` for stdin
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Additional audits to skip, e.g. `--disable autocomplete-off`
        #[arg(long = "disable", value_name = "AUDIT")]
        disabled: Vec<String>,
    },

    /// Capture a CDP `DOM.getDocument` snapshot into a tree
    Capture {
        /// Snapshot JSON file, `-` for stdin
        input: PathBuf,

        /// Audit the captured tree instead of printing it
        #[arg(long)]
        audit: bool,

        /// Output format for `--audit`
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}
