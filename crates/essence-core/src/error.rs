//! # Error Types
//!
//! Domain-specific error types for essence-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  essence-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  essence-client errors (separate crate)                                │
//! │  └── ClientError      - Network, payload and config failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → user notification   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reconciliation arithmetic itself never fails. Errors here come from
//! the gates around it: missing input and the no-sales policy.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A closing cannot be submitted for a day without sales.
    ///
    /// ## When This Occurs
    /// - The daily summary reports `totalSales == 0`
    /// - No daily summary exists for the date at all
    #[error("No sales recorded for {date}; the day cannot be closed")]
    NoSalesRecorded { date: NaiveDate },

    /// An operation needs an open cash session and there is none.
    #[error("No cash session is open")]
    SessionNotOpen,

    /// Opening a session while another one is still open.
    #[error("Cash session {id} is already open")]
    SessionAlreadyOpen { id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements and are raised
/// before any request leaves the client.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Amount must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A from/to pair is inconsistent.
    #[error("Invalid range: {reason}")]
    InvalidRange { reason: String },

    /// The day's summary belongs to a different date than the closing.
    #[error("Summary is for {found}, but the closing is for {expected}")]
    DateMismatch { expected: NaiveDate, found: NaiveDate },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
