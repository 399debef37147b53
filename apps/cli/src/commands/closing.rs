//! # Closing Commands
//!
//! ```text
//! close-day ──► load day ──► preview ──┬── --dry-run ──► stop
//!                                      └── submit ─────► ClosingRecord
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use essence_client::report_file_name;
use essence_core::{CashCheck, ClosingRecord};
use serde::Serialize;
use tracing::debug;

use super::{today, Context};
use crate::cli::CloseDayArgs;
use crate::error::CliResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CloseDayOutput {
    check: CashCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<ClosingRecord>,
}

/// Reconciles the counted drawer and, unless `--dry-run`, submits it.
pub async fn close_day(ctx: &Context, args: CloseDayArgs) -> CliResult<()> {
    let date = args.date.unwrap_or_else(today);
    debug!(%date, dry_run = args.dry_run, "close-day command");

    let workflow = ctx.workflow()?;
    let day = workflow.load(date, args.opening).await;

    let mut entry = day.entry().with_count(args.counted);
    if let Some(notes) = args.notes {
        entry = entry.with_notes(notes);
    }

    let check = workflow.preview(&day, &entry);
    let record = if args.dry_run {
        None
    } else {
        Some(workflow.submit(&day, &entry).await?)
    };

    let output = CloseDayOutput { check, record };
    ctx.emit(&output, || {
        let mut text = format!("Cash closing for {date}\n");
        text.push_str(&ctx.format.cash_check(&output.check));
        match &output.record {
            Some(record) => text.push_str(&format!("Closing {} recorded.\n", record.id)),
            None => text.push_str("Dry run: nothing was submitted.\n"),
        }
        text
    })
}

/// Lists closings between two dates.
pub async fn history(ctx: &Context, from: NaiveDate, to: NaiveDate) -> CliResult<()> {
    debug!(%from, %to, "history command");
    let records = ctx.workflow()?.api().closing_history(from, to).await?;
    ctx.emit(&records, || ctx.format.history(&records))
}

/// Saves the day's PDF report.
pub async fn report(ctx: &Context, date: NaiveDate, output: Option<PathBuf>) -> CliResult<()> {
    debug!(%date, "report command");
    let path = output.unwrap_or_else(|| PathBuf::from(report_file_name(date)));
    let written = ctx.workflow()?.download_report(date, &path).await?;

    ctx.emit(&written, || format!("Report saved to {}\n", written.display()))
}
