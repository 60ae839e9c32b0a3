//! Docmate CLI - documentation metadata extraction for JavaScript/TypeScript.
//!
//! Entry point: parses arguments, initializes logging and dispatches to the
//! selected command.

use anyhow::Result;
use clap::Parser;
use docmate_cli::{cli, commands, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    match args.command {
        cli::Command::Extract(extract_args) => commands::extract_execute(extract_args).await,
        cli::Command::Deps(deps_args) => commands::deps_execute(deps_args).await,
    }
}
