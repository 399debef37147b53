//! # essence-core: Pure Business Logic for Essence POS
//!
//! This crate holds the cash-closing logic of the Essence POS client as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Essence POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front ends (CLI, browser bindings)              │   │
//! │  │      Daily summary ──► Count cash ──► Preview ──► Submit        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          essence-client (REST client, typed boundary)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ essence-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐ ┌──────────┐  │   │
//! │  │   │   types   │  │   money   │  │reconciliation│ │validation│  │   │
//! │  │   │ Summary   │  │   Money   │  │ expected cash│ │  gates   │  │   │
//! │  │   │ Session   │  │           │  │ variance tier│ │          │  │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (DailySummary, ClosingEntry, CashSession, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`reconciliation`] - Expected cash and variance classification
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use essence_core::money::Money;
//! use essence_core::reconciliation::{reconcile, VarianceTier};
//! use essence_core::types::DailySummary;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let summary = DailySummary {
//!     cash_sales: Money::from_units(200_000),
//!     card_sales: Money::from_units(80_000),
//!     total_income: Money::from_units(10_000),
//!     total_expense: Money::from_units(30_000),
//!     total_payments: Money::from_units(15_000),
//!     total_sales: Money::from_units(280_000),
//!     ..DailySummary::empty(date)
//! };
//!
//! let result = reconcile(Money::from_units(50_000), &summary, Money::from_units(215_000));
//! assert_eq!(result.expected_cash.units(), 215_000);
//! assert_eq!(result.tier, VarianceTier::Balanced);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod reconciliation;
pub mod types;
pub mod validation;

#[cfg(test)]
mod reconciliation_props;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reconciliation::{CashCheck, Reconciliation, VarianceDirection, VarianceTier};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest variance (absolute, in currency units) still reported as a minor
/// variance. Anything above is significant.
pub const MINOR_VARIANCE_LIMIT: i64 = 5_000;

/// Variances strictly above this amount raise the manual-review advisory.
///
/// Independent of the tier: a variance can be significant without triggering
/// the advisory (5_001..=10_000).
pub const REVIEW_THRESHOLD: i64 = 10_000;

/// Largest amount magnitude (2^53) accepted from users or the store API.
///
/// Every integer up to this bound is exact as an `f64`. The store's JSON
/// numbers and user input share this limit.
pub const MAX_AMOUNT_UNITS: i64 = 9_007_199_254_740_992;

/// Maximum length of the free-text notes attached to a closing.
pub const MAX_NOTES_LEN: usize = 500;

/// Maximum span of a closing history query, in days.
pub const MAX_HISTORY_DAYS: i64 = 366;
