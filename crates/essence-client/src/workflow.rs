//! # Cash Closing Workflow
//!
//! Orchestrates one end-of-day close: load the day, let the cashier count,
//! preview the variance, submit once.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load(date)                                                             │
//! │    ├── GET daily summary ──── fails? ──► warn, summary = None           │
//! │    ├── GET active session ─── fails? ──► warn, use cached session       │
//! │    └── opening cash = manual ▸ session float ▸ 0                        │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  ClosingDay { date, summary, opening_cash, session }                    │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  preview(count) ──► CashCheck (pure, as often as the cashier types)     │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  submit(entry) ──► finalize_closing ──► POST /cash-closings (once)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed submit leaves the caller's [`ClosingEntry`] untouched so it can be
//! corrected and sent again.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use essence_core::reconciliation::finalize_closing;
use essence_core::validation::{validate_amount, validate_notes};
use essence_core::{
    CashCheck, CashSession, ClosingEntry, ClosingRecord, CoreError, DailySummary, Money,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::wire::ClosingRequest;

// =============================================================================
// Closing Day
// =============================================================================

/// Everything loaded for closing one business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingDay {
    pub date: NaiveDate,
    /// `None` when the API had no summary or could not be reached.
    pub summary: Option<DailySummary>,
    pub opening_cash: Money,
    pub session: Option<CashSession>,
}

impl ClosingDay {
    /// Blank entry for this day, pre-filled with the opening cash.
    pub fn entry(&self) -> ClosingEntry {
        ClosingEntry::new(self.date, self.opening_cash)
    }

    /// Recomputes the variance for a counted amount. No I/O.
    pub fn preview(&self, closing_cash: Money) -> CashCheck {
        CashCheck::evaluate(self.opening_cash, self.summary.as_ref(), closing_cash)
    }

    /// Whether the day can be closed at all.
    pub fn has_sales(&self) -> bool {
        self.summary.as_ref().is_some_and(DailySummary::has_sales)
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Drives session and closing operations against the store API.
#[derive(Debug, Clone)]
pub struct CashClosingWorkflow {
    api: ApiClient,
}

impl CashClosingWorkflow {
    pub fn new(api: ApiClient) -> Self {
        CashClosingWorkflow { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Loads the summary and the opening float for `date`.
    ///
    /// `manual_opening` wins over the open session's float; without either
    /// the opening cash is zero. Neither fetch failing aborts the load.
    pub async fn load(&self, date: NaiveDate, manual_opening: Option<Money>) -> ClosingDay {
        let summary = match self.api.daily_summary(date).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(%date, error = %e, "Could not load daily summary, continuing without it");
                None
            }
        };

        let session = match self.api.active_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Could not refresh active session, using cached state");
                self.api.session().active_session()
            }
        };

        let opening_cash = manual_opening
            .or_else(|| session.as_ref().map(|s| s.opening_cash))
            .unwrap_or_default();

        info!(
            %date,
            has_summary = summary.is_some(),
            session_id = session.as_ref().map(|s| s.id.as_str()).unwrap_or("-"),
            opening_cash = %opening_cash,
            "Closing day loaded"
        );

        ClosingDay {
            date,
            summary,
            opening_cash,
            session,
        }
    }

    /// Recomputes the variance for an entry. No I/O.
    pub fn preview(&self, day: &ClosingDay, entry: &ClosingEntry) -> CashCheck {
        CashCheck::for_entry(entry, day.summary.as_ref())
    }

    /// Validates the entry against the loaded day and posts it once.
    pub async fn submit(
        &self,
        day: &ClosingDay,
        entry: &ClosingEntry,
    ) -> ClientResult<ClosingRecord> {
        let closing = finalize_closing(entry, day.summary.as_ref())?;

        if closing.review_advised {
            warn!(
                date = %closing.date,
                difference = %closing.difference,
                "Variance exceeds the review threshold"
            );
        }

        let request = ClosingRequest::from(&closing);
        let record = self.api.submit_closing(&request).await?;

        info!(
            date = %record.date,
            tier = %closing.tier,
            difference = %record.difference,
            "Day closed"
        );
        Ok(record)
    }

    // =========================================================================
    // Cash Sessions
    // =========================================================================

    /// Opens the register, refusing when a session is already open.
    pub async fn open_session(
        &self,
        opening_cash: Money,
        notes: Option<&str>,
    ) -> ClientResult<CashSession> {
        validate_amount("opening cash", opening_cash)?;
        let notes = validate_notes(notes)?;

        if let Some(existing) = self.api.active_session().await? {
            return Err(CoreError::SessionAlreadyOpen { id: existing.id }.into());
        }

        self.api.open_session(opening_cash, notes).await
    }

    /// Closes the open register with the counted amount.
    pub async fn close_session(
        &self,
        closing_cash: Money,
        notes: Option<&str>,
    ) -> ClientResult<CashSession> {
        validate_amount("closing cash", closing_cash)?;
        let notes = validate_notes(notes)?;

        let session = self
            .api
            .active_session()
            .await?
            .ok_or(CoreError::SessionNotOpen)?;

        self.api.close_session(&session.id, closing_cash, notes).await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Saves the day's closing report to `path`, creating parent directories.
    pub async fn download_report(&self, date: NaiveDate, path: &Path) -> ClientResult<PathBuf> {
        let bytes = self.api.closing_report_pdf(date).await?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &bytes).await?;

        info!(%date, path = %path.display(), size = bytes.len(), "Closing report saved");
        Ok(path.to_path_buf())
    }
}

/// Default file name for a day's report.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("cash-closing-{}.pdf", date.format("%Y-%m-%d"))
}
