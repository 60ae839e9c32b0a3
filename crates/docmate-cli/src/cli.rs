//! Command-line interface definition.
//!
//! Defines the CLI structure with clap's derive macros.
//!
//! # Command Structure
//!
//! - `docmate extract` - Extract documentation metadata for an entry module
//! - `docmate deps` - Print the relative-import dependency tree

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Docmate - documentation metadata for JavaScript/TypeScript modules
#[derive(Parser, Debug)]
#[command(
    name = "docmate",
    version,
    about = "Extract documentation metadata from JavaScript/TypeScript modules",
    long_about = "Docmate parses an entry module, indexes its exported declarations with\n\
                  their types, descriptions and literal values, follows re-export chains\n\
                  across files, and writes the result as a single JSON document."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available Docmate subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract documentation metadata for an entry module
    ///
    /// Resolves the entry from the --entry flag, the DOCMATE_ENTRY
    /// environment variable or package.json, and writes the document to
    /// .fox/doc-mate-data.json in the working directory.
    Extract(ExtractArgs),

    /// Print the relative-import dependency tree of an entry module
    ///
    /// Walks import statements depth first, skipping package imports, and
    /// prints the tree as JSON on stdout.
    Deps(DepsArgs),
}

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Entry module to document
    ///
    /// Relative paths resolve against the working directory. When omitted,
    /// the DOCMATE_ENTRY environment variable is consulted, then the
    /// package.json `docEntry` and `main` fields.
    #[arg(short, long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Treat unresolved exports as errors
    ///
    /// By default an exported name with no matching declaration is dropped
    /// from the document and reported as a warning.
    #[arg(long)]
    pub fail_on_unresolved: bool,
}

/// Arguments for the deps command
#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Entry module to walk
    ///
    /// Resolved the same way as for `docmate extract`.
    #[arg(short, long, value_name = "FILE")]
    pub entry: Option<PathBuf>,
}
