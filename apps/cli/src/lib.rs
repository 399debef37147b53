//! # Essence CLI Library
//!
//! Command-line front end for end-of-day cash closing.
//!
//! ## Module Organization
//! ```text
//! essence_cli/
//! ├── lib.rs          ◄─── You are here (startup & exit codes)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── commands/       ◄─── One module per command group
//! ├── output.rs       ◄─── Plain-text rendering
//! └── error.rs        ◄─── CliError + exit codes
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Parse arguments (clap)                                              │
//! │  2. Initialize tracing (RUST_LOG, --verbose)                            │
//! │  3. Load ClientConfig (defaults ► client.toml ► ESSENCE_* env)          │
//! │  4. Dispatch the command                                                │
//! │  5. Print error, return exit code                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

use clap::Parser;
use essence_client::ClientConfig;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ConfigCommand};
use commands::Context;
use error::CliError;

/// Parses arguments, runs the command and returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(version = env!("CARGO_PKG_VERSION"), "Starting essence");

    let json = cli.json;
    match execute(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err, json);
            err.code.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    // `config init` must work even when the existing file is broken.
    let config = match &cli.command {
        Command::Config(ConfigCommand::Init { .. }) => ClientConfig::default(),
        _ => ClientConfig::load(cli.config.clone())?,
    };
    debug!(base_url = %config.api.base_url, store = %config.store.name, "Config loaded");

    let ctx = Context::new(config, cli.config, cli.json);
    commands::dispatch(&ctx, cli.command).await
}

fn report_error(err: &CliError, json: bool) {
    if json {
        match serde_json::to_string_pretty(err) {
            Ok(body) => eprintln!("{body}"),
            Err(_) => eprintln!("error: {err}"),
        }
    } else {
        eprintln!("error: {err}");
    }
}

/// Default directives when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn,essence=info";

/// Builds the log filter from `RUST_LOG` (if any) and `--verbose`.
///
/// `--verbose` adds a `debug` default level on top of whatever `RUST_LOG`
/// selects; more specific `RUST_LOG` directives still apply.
fn tracing_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = tracing_filter(env.as_deref(), verbose);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = tracing_filter(None, false).to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains("essence=info"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_verbose_applies_with_rust_log_set() {
        let filter = tracing_filter(Some("reqwest=trace"), true).to_string();
        assert!(filter.contains("reqwest=trace"));
        assert!(filter.contains("debug"));
    }

    #[test]
    fn test_invalid_rust_log_falls_back() {
        let filter = tracing_filter(Some("essence=loud"), false).to_string();
        assert!(filter.contains("essence=info"));
    }
}
