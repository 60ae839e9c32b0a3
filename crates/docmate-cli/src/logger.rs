//! Logging setup for the Docmate CLI.
//!
//! Structured logging over the `tracing` ecosystem with verbosity flags and
//! `RUST_LOG` overrides.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at program start, before any logging occurs.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug level for docmate crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable
/// 4. Default: info level for docmate crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("docmate_core=debug,docmate_graph=debug,docmate_cli=debug")
    } else if quiet {
        EnvFilter::new("docmate_core=error,docmate_graph=error,docmate_cli=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("docmate_core=info,docmate_graph=info,docmate_cli=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
