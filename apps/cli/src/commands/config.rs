//! # Config and Health Commands

use essence_client::ClientConfig;
use serde::Serialize;
use tracing::debug;

use super::Context;
use crate::cli::ConfigCommand;
use crate::error::{CliError, CliResult, ErrorCode};

pub fn run(ctx: &Context, command: ConfigCommand) -> CliResult<()> {
    debug!(?command, "config command");
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { force } => init(ctx, force),
    }
}

/// Prints the effective configuration with the token masked.
fn show(ctx: &Context) -> CliResult<()> {
    let mut config = ctx.config.clone();
    if config.api.token.is_some() {
        config.api.token = Some("********".to_string());
    }

    let text = toml::to_string_pretty(&config).map_err(|e| CliError::internal(e.to_string()))?;
    ctx.emit(&config, || text.clone())
}

/// Writes a default config file, refusing to overwrite without `--force`.
fn init(ctx: &Context, force: bool) -> CliResult<()> {
    let path = ctx
        .config_path
        .clone()
        .or_else(ClientConfig::default_config_path)
        .ok_or_else(|| CliError::new(ErrorCode::Config, "No config directory on this platform"))?;

    if path.exists() && !force {
        return Err(CliError::new(
            ErrorCode::Config,
            format!("{} already exists (use --force to overwrite)", path.display()),
        ));
    }

    let written = ClientConfig::default().save(Some(path))?;
    ctx.emit(&written, || format!("Wrote {}\n", written.display()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthOutput {
    base_url: String,
    latency_ms: u64,
}

/// Pings the store API.
pub async fn health(ctx: &Context) -> CliResult<()> {
    let workflow = ctx.workflow()?;
    let latency = workflow.api().health().await?;

    let output = HealthOutput {
        base_url: workflow.api().base_url().to_string(),
        latency_ms: latency.as_millis() as u64,
    };
    ctx.emit(&output, || {
        format!("{} is reachable ({} ms)\n", output.base_url, output.latency_ms)
    })
}
