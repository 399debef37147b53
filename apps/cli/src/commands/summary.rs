//! # Summary Command

use chrono::NaiveDate;
use tracing::debug;

use super::Context;
use crate::error::CliResult;

/// Prints the day's summary. Fetch errors are reported, not hidden.
pub async fn show(ctx: &Context, date: NaiveDate) -> CliResult<()> {
    debug!(%date, "summary command");
    let summary = ctx.workflow()?.api().daily_summary(date).await?;

    ctx.emit(&summary, || match &summary {
        Some(summary) => ctx.format.summary(summary),
        None => format!("No summary recorded for {date}.\n"),
    })
}
