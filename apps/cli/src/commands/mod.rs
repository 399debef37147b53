//! # CLI Commands
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Context, dispatch)
//! ├── summary.rs  ◄─── Daily summary
//! ├── session.rs  ◄─── Register open/close/status
//! ├── closing.rs  ◄─── close-day, history, report
//! └── config.rs   ◄─── config show/init, health
//! ```
//!
//! Each command receives the shared [`Context`] and returns `CliResult<()>`;
//! printing happens in the command, exit codes in `lib.rs`.

pub mod closing;
pub mod config;
pub mod session;
pub mod summary;

use std::path::PathBuf;

use chrono::NaiveDate;
use essence_client::{ApiClient, CashClosingWorkflow, ClientConfig, SessionState};
use serde::Serialize;

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use crate::output::Formatter;

/// What every command needs.
pub struct Context {
    pub config: ClientConfig,
    pub config_path: Option<PathBuf>,
    pub format: Formatter,
    pub json: bool,
}

impl Context {
    pub fn new(config: ClientConfig, config_path: Option<PathBuf>, json: bool) -> Self {
        let format = Formatter::new(config.store.currency_symbol.clone());
        Context {
            config,
            config_path,
            format,
            json,
        }
    }

    /// Builds the API client and workflow. Only commands that talk to the
    /// store call this.
    pub fn workflow(&self) -> CliResult<CashClosingWorkflow> {
        let api = ApiClient::new(&self.config, SessionState::new())?;
        Ok(CashClosingWorkflow::new(api))
    }

    /// Prints `value` as JSON in `--json` mode, otherwise `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> CliResult<()> {
        if self.json {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| CliError::internal(e.to_string()))?;
            println!("{json}");
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

/// Today's business date on this machine.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Runs one parsed command.
pub async fn dispatch(ctx: &Context, command: Command) -> CliResult<()> {
    match command {
        Command::Summary { date } => summary::show(ctx, date.unwrap_or_else(today)).await,
        Command::Session(cmd) => session::run(ctx, cmd).await,
        Command::CloseDay(args) => closing::close_day(ctx, args).await,
        Command::History { from, to } => closing::history(ctx, from, to).await,
        Command::Report { date, output } => {
            closing::report(ctx, date.unwrap_or_else(today), output).await
        }
        Command::Health => config::health(ctx).await,
        Command::Config(cmd) => config::run(ctx, cmd),
    }
}
