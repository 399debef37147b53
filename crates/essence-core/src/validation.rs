//! # Validation Module
//!
//! Input validation for the cash-closing flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Client boundary (essence-client::wire)                       │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── Monetary numbers: finite, whole units, in range                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── User input: amounts, notes, dates                                 │
//! │  └── Submission gate: count present, day has sales                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store API                                                    │
//! │  └── Canonical business-rule enforcement                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ClosingEntry, DailySummary};
use crate::{MAX_AMOUNT_UNITS, MAX_HISTORY_DAYS, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a user-entered amount.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (an empty drawer is a valid count)
/// - Must not exceed [`MAX_AMOUNT_UNITS`]
///
/// ```rust
/// use essence_core::money::Money;
/// use essence_core::validation::validate_amount;
///
/// assert!(validate_amount("closing cash", Money::from_units(0)).is_ok());
/// assert!(validate_amount("closing cash", Money::from_units(-1)).is_err());
/// assert!(validate_amount("closing cash", Money::from_units(i64::MAX)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    if amount.units() > MAX_AMOUNT_UNITS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_UNITS,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates closing notes.
///
/// ## Returns
/// The trimmed notes, or `None` if they were blank.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };

    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(Some(notes.to_string()))
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a `YYYY-MM-DD` business date.
///
/// ```rust
/// use essence_core::validation::parse_date;
///
/// assert!(parse_date("date", "2024-03-01").is_ok());
/// assert!(parse_date("date", "01/03/2024").is_err());
/// ```
pub fn parse_date(field: &str, raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

/// Validates a closing-history range.
///
/// ## Rules
/// - `from` must not be after `to`
/// - The range may span at most [`MAX_HISTORY_DAYS`] days
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> ValidationResult<()> {
    if from > to {
        return Err(ValidationError::InvalidRange {
            reason: format!("start {from} is after end {to}"),
        });
    }

    let span = (to - from).num_days() + 1;
    if span > MAX_HISTORY_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "history range (days)".to_string(),
            min: 1,
            max: MAX_HISTORY_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// Submission Gate
// =============================================================================

/// Checks that a closing entry may be submitted.
///
/// ## Rules
/// - The drawer must have been counted
/// - Opening and counted amounts must be non-negative
/// - Notes must fit [`MAX_NOTES_LEN`]
/// - A summary must belong to the entry's day
/// - The day must have a summary with sales (`totalSales > 0`)
///
/// ## Returns
/// The counted amount, the cleaned notes, and the summary, so the caller
/// does not have to unwrap them again.
pub fn validate_closing<'a>(
    entry: &ClosingEntry,
    summary: Option<&'a DailySummary>,
) -> CoreResult<(Money, Option<String>, &'a DailySummary)> {
    let closing_cash = entry.closing_cash.ok_or_else(|| ValidationError::Required {
        field: "closing cash".to_string(),
    })?;

    validate_amount("opening cash", entry.opening_cash)?;
    validate_amount("closing cash", closing_cash)?;
    let notes = validate_notes(entry.notes.as_deref())?;

    if let Some(summary) = summary {
        if summary.date != entry.date {
            return Err(ValidationError::DateMismatch {
                expected: entry.date,
                found: summary.date,
            }
            .into());
        }
    }

    let summary = summary
        .filter(|s| s.has_sales())
        .ok_or(CoreError::NoSalesRecorded { date: entry.date })?;

    Ok((closing_cash, notes, summary))
}

// =============================================================================
// Unit Tests
// =============================================================================
