//! # Cash Reconciliation
//!
//! Derives the expected cash-on-hand for a day and classifies the
//! counted-vs-expected variance.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   expected = opening + cash sales + other income                        │
//! │                      - expenses   - supplier payments                   │
//! │                                                                         │
//! │   difference = counted - expected                                       │
//! │                                                                         │
//! │   |difference| == 0        ──► Balanced            (success)            │
//! │   |difference| <= 5,000    ──► MinorVariance       (warning)            │
//! │   otherwise                ──► SignificantVariance (error)              │
//! │                                                                         │
//! │   |difference| >  10,000   ──► review advisory (independent of tier)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs; front ends call it again
//! whenever the opening amount, the count or the day's summary changes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{ClosingEntry, ClosingRecord, DailySummary};
use crate::validation::validate_closing;
use crate::{MINOR_VARIANCE_LIMIT, REVIEW_THRESHOLD};

// =============================================================================
// Variance Tier
// =============================================================================

/// Severity tier of a cash variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VarianceTier {
    /// Counted cash matches the expected amount exactly.
    Balanced,
    /// Off by at most [`MINOR_VARIANCE_LIMIT`].
    MinorVariance,
    /// Off by more than [`MINOR_VARIANCE_LIMIT`].
    SignificantVariance,
}

impl VarianceTier {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            VarianceTier::Balanced => "balanced",
            VarianceTier::MinorVariance => "minor variance",
            VarianceTier::SignificantVariance => "significant variance",
        }
    }

    /// Display severity for the tier tag.
    pub fn severity(&self) -> Severity {
        match self {
            VarianceTier::Balanced => Severity::Success,
            VarianceTier::MinorVariance => Severity::Warning,
            VarianceTier::SignificantVariance => Severity::Error,
        }
    }
}

impl std::fmt::Display for VarianceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display severity used by front ends to colour the tier tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

// =============================================================================
// Variance Direction
// =============================================================================

/// Sign of the variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VarianceDirection {
    /// More cash in the drawer than expected.
    Surplus,
    /// Less cash in the drawer than expected.
    Shortage,
    /// Exactly as expected.
    Even,
}

impl VarianceDirection {
    pub fn of(difference: Money) -> Self {
        if difference.is_positive() {
            VarianceDirection::Surplus
        } else if difference.is_negative() {
            VarianceDirection::Shortage
        } else {
            VarianceDirection::Even
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Expected cash-on-hand for a day.
///
/// ```rust
/// use chrono::NaiveDate;
/// use essence_core::money::Money;
/// use essence_core::reconciliation::expected_cash;
/// use essence_core::types::DailySummary;
///
/// let summary = DailySummary {
///     cash_sales: Money::from_units(100_000),
///     total_expense: Money::from_units(20_000),
///     total_payments: Money::from_units(5_000),
///     ..DailySummary::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
/// };
/// assert_eq!(expected_cash(Money::from_units(50_000), &summary).units(), 125_000);
/// ```
pub fn expected_cash(opening_cash: Money, summary: &DailySummary) -> Money {
    opening_cash + summary.cash_sales + summary.total_income
        - summary.total_expense
        - summary.total_payments
}

/// Classifies a variance. Only the magnitude matters.
pub fn classify_variance(difference: Money) -> VarianceTier {
    let magnitude = difference.abs().units();

    if magnitude == 0 {
        VarianceTier::Balanced
    } else if magnitude <= MINOR_VARIANCE_LIMIT {
        VarianceTier::MinorVariance
    } else {
        VarianceTier::SignificantVariance
    }
}

/// True when the variance is large enough to recommend a manual review.
#[inline]
pub fn review_advised(difference: Money) -> bool {
    difference.abs().units() > REVIEW_THRESHOLD
}

/// Full result of reconciling a counted drawer against the day's summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Reconciliation {
    pub opening_cash: Money,
    pub expected_cash: Money,
    pub closing_cash: Money,
    pub difference: Money,
    pub tier: VarianceTier,
    pub direction: VarianceDirection,
    pub review_advised: bool,
}

impl Reconciliation {
    /// Builds the result from an already known expected amount.
    fn from_parts(opening_cash: Money, expected_cash: Money, closing_cash: Money) -> Self {
        let difference = closing_cash - expected_cash;
        Reconciliation {
            opening_cash,
            expected_cash,
            closing_cash,
            difference,
            tier: classify_variance(difference),
            direction: VarianceDirection::of(difference),
            review_advised: review_advised(difference),
        }
    }

    /// Detail view of a stored closing.
    ///
    /// Uses the stored expected amount rather than recomputing it, so the
    /// view matches what was submitted even if the day's summary changed
    /// afterwards. The tier and advisory are derived from the stored
    /// difference with the current thresholds.
    pub fn from_record(record: &ClosingRecord) -> Self {
        Reconciliation {
            opening_cash: record.opening_cash,
            expected_cash: record.system_cash,
            closing_cash: record.closing_cash,
            difference: record.difference,
            tier: classify_variance(record.difference),
            direction: VarianceDirection::of(record.difference),
            review_advised: review_advised(record.difference),
        }
    }

    /// True if the stored difference is consistent with counted - expected.
    pub fn is_consistent(&self) -> bool {
        self.closing_cash - self.expected_cash == self.difference
    }
}

/// Reconciles a counted drawer against the day's summary.
pub fn reconcile(opening_cash: Money, summary: &DailySummary, closing_cash: Money) -> Reconciliation {
    Reconciliation::from_parts(opening_cash, expected_cash(opening_cash, summary), closing_cash)
}

// =============================================================================
// Cash Check (summary may be missing)
// =============================================================================

/// What a front end shows for the current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum CashCheck {
    /// No summary for the day. Nothing is computed, not even zeros.
    NoData,
    /// The reconciliation for the current inputs.
    Ready(Reconciliation),
}

impl CashCheck {
    /// Evaluates the current inputs; skips the calculator without a summary.
    pub fn evaluate(
        opening_cash: Money,
        summary: Option<&DailySummary>,
        closing_cash: Money,
    ) -> Self {
        match summary {
            Some(summary) => CashCheck::Ready(reconcile(opening_cash, summary, closing_cash)),
            None => CashCheck::NoData,
        }
    }

    /// Evaluates a closing entry; an uncounted drawer counts as zero.
    pub fn for_entry(entry: &ClosingEntry, summary: Option<&DailySummary>) -> Self {
        Self::evaluate(entry.opening_cash, summary, entry.counted_or_zero())
    }

    pub fn reconciliation(&self) -> Option<&Reconciliation> {
        match self {
            CashCheck::Ready(r) => Some(r),
            CashCheck::NoData => None,
        }
    }
}

// =============================================================================
// Finalized Closing
// =============================================================================

/// A closing entry that passed the submission gate, with derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinalizedClosing {
    #[ts(as = "String")]
    pub date: chrono::NaiveDate,
    pub opening_cash: Money,
    pub closing_cash: Money,
    pub system_cash: Money,
    pub difference: Money,
    pub notes: Option<String>,
    pub tier: VarianceTier,
    pub review_advised: bool,
}

/// Runs the submission gate and computes the derived fields.
///
/// ## Flow
/// ```text
/// ClosingEntry + Option<DailySummary>
///      │
///      ▼
/// validate_closing ──► count missing?     → ValidationError::Required
///      │           ──► negative amounts?  → ValidationError::MustBeNonNegative
///      │           ──► above 2^53?        → ValidationError::OutOfRange
///      │           ──► other day's data?  → ValidationError::DateMismatch
///      │           ──► no sales that day? → CoreError::NoSalesRecorded
///      ▼
/// reconcile ──► FinalizedClosing { system_cash, difference, ... }
/// ```
pub fn finalize_closing(
    entry: &ClosingEntry,
    summary: Option<&DailySummary>,
) -> CoreResult<FinalizedClosing> {
    let (closing_cash, notes, summary) = validate_closing(entry, summary)?;
    let result = reconcile(entry.opening_cash, summary, closing_cash);

    Ok(FinalizedClosing {
        date: entry.date,
        opening_cash: entry.opening_cash,
        closing_cash,
        system_cash: result.expected_cash,
        difference: result.difference,
        notes,
        tier: result.tier,
        review_advised: result.review_advised,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
