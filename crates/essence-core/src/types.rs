//! # Domain Types
//!
//! Core domain types for the cash-closing flow.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DailySummary   │   │  ClosingEntry   │   │  ClosingRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  from the API   │   │  built by user  │   │  persisted by   │       │
//! │  │  read-only      │   │  transient      │   │  the API        │       │
//! │  │  per day        │   │  submitted once │   │  history/detail │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  CashSession    │   │ SessionStatus   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  opening_cash   │   │  Open           │                             │
//! │  │  opened_at      │   │  Closed         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize with camelCase field names to match the store API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Daily Summary
// =============================================================================

/// Per-day sales and cash-flow aggregates, computed by the store API.
///
/// Every amount is non-negative once it has passed the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DailySummary {
    /// Calendar day the aggregates belong to.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Sales paid in cash.
    pub cash_sales: Money,

    /// Sales paid by card.
    pub card_sales: Money,

    /// Sales paid by bank transfer.
    pub transfer_sales: Money,

    /// Sales on store credit.
    pub credit_sales: Money,

    /// Other cash income (not sales).
    pub total_income: Money,

    /// Cash expenses paid out of the drawer.
    pub total_expense: Money,

    /// Supplier payments paid out of the drawer.
    pub total_payments: Money,

    /// All sales regardless of payment method.
    pub total_sales: Money,
}

impl DailySummary {
    /// A summary with every amount at zero.
    pub fn empty(date: NaiveDate) -> Self {
        DailySummary {
            date,
            cash_sales: Money::zero(),
            card_sales: Money::zero(),
            transfer_sales: Money::zero(),
            credit_sales: Money::zero(),
            total_income: Money::zero(),
            total_expense: Money::zero(),
            total_payments: Money::zero(),
            total_sales: Money::zero(),
        }
    }

    /// Sales that never touched the cash drawer.
    pub fn non_cash_sales(&self) -> Money {
        self.card_sales + self.transfer_sales + self.credit_sales
    }

    /// True if anything was sold on this day.
    #[inline]
    pub fn has_sales(&self) -> bool {
        self.total_sales.is_positive()
    }
}

// =============================================================================
// Closing Entry
// =============================================================================

/// The user's side of a cash closing, before submission.
///
/// `closing_cash` stays `None` until the drawer has been counted. Previews
/// treat it as zero; submission refuses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClosingEntry {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub opening_cash: Money,
    pub closing_cash: Option<Money>,
    pub notes: Option<String>,
}

impl ClosingEntry {
    /// Starts an entry for `date` with a known opening balance.
    pub fn new(date: NaiveDate, opening_cash: Money) -> Self {
        ClosingEntry {
            date,
            opening_cash,
            closing_cash: None,
            notes: None,
        }
    }

    /// Records the physically counted amount.
    pub fn with_count(mut self, closing_cash: Money) -> Self {
        self.closing_cash = Some(closing_cash);
        self
    }

    /// Attaches free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Counted amount, or zero while the count is still pending.
    #[inline]
    pub fn counted_or_zero(&self) -> Money {
        self.closing_cash.unwrap_or_default()
    }
}

// =============================================================================
// Cash Session
// =============================================================================

/// Register state of a cash session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    /// Register is open and taking sales.
    #[default]
    Open,
    /// Register has been closed and counted.
    Closed,
}

/// A tracked interval between opening and closing the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CashSession {
    pub id: String,
    pub opening_cash: Money,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    pub status: SessionStatus,
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,
    pub closing_cash: Option<Money>,
    pub opened_by: Option<String>,
    pub notes: Option<String>,
}

impl CashSession {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }
}

// =============================================================================
// Closing Record
// =============================================================================

/// A persisted cash closing as returned by the store API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClosingRecord {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub opening_cash: Money,
    pub closing_cash: Money,
    /// Expected cash as computed at submission time.
    pub system_cash: Money,
    /// Counted minus expected at submission time.
    pub difference: Money,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub closed_by: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
