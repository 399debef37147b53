//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The store API sends amounts as plain JSON numbers:                     │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cash count that should balance to exactly zero can drift to          │
//! │  0.00000001 and land in the wrong variance tier.                        │
//! │                                                                         │
//! │  OUR SOLUTION: Whole currency units in an i64                           │
//! │    The store does not track fractional units, so every amount is an     │
//! │    integer. Wire numbers are converted once, at the client boundary.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use essence_core::money::Money;
//!
//! let opening = Money::from_units(50_000);
//! let sales = Money::from_units(100_000);
//!
//! let total = opening + sales;
//! assert_eq!(total.units(), 150_000);
//!
//! // No `Money::from_f64`: wire numbers go through the boundary
//! // conversion in essence-client.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences and shortages are negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare integer**: `{"cashSales": 200000}`
/// - **Saturating arithmetic**: operators clamp at the `i64` limits instead
///   of panicking; validated inputs never get close to them
///
/// ## Where Money is Used
/// ```text
/// DailySummary.cash_sales ──┐
/// DailySummary.total_income ├──► expected_cash ──► difference ──► tier
/// ClosingEntry.opening_cash ┘                          ▲
///                                                      │
/// ClosingEntry.closing_cash (counted) ─────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ```rust
    /// use essence_core::money::Money;
    ///
    /// let count = Money::from_units(215_000);
    /// assert_eq!(count.units(), 215_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ```rust
    /// use essence_core::money::Money;
    ///
    /// let shortage = Money::from_units(-5_000);
    /// assert_eq!(shortage.abs().units(), 5_000);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Formats the amount with a currency symbol and thousands separators.
    ///
    /// ```rust
    /// use essence_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(215_000).format_with("$"), "$215,000");
    /// assert_eq!(Money::from_units(-5_001).format_with("COP "), "-COP 5,001");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{sign}{symbol}{grouped}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display with a `$` symbol.
///
/// Front ends with a configured currency symbol use [`Money::format_with`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(125_000);
        assert_eq!(money.units(), 125_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(0).to_string(), "$0");
        assert_eq!(Money::from_units(999).to_string(), "$999");
        assert_eq!(Money::from_units(1_000).to_string(), "$1,000");
        assert_eq!(Money::from_units(215_000).to_string(), "$215,000");
        assert_eq!(Money::from_units(1_234_567).to_string(), "$1,234,567");
        assert_eq!(Money::from_units(-5_000).to_string(), "-$5,000");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_units(10_001).format_with("COP "), "COP 10,001");
        assert_eq!(Money::from_units(-12).format_with("€"), "-€12");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1_000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1_500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((b - a).units(), -500);
        assert_eq!((-a).units(), -1_000);

        let mut c = a;
        c += b;
        c -= Money::from_units(100);
        assert_eq!(c.units(), 1_400);
    }

    #[test]
    fn test_arithmetic_saturates_at_limits() {
        let max = Money::from_units(i64::MAX);
        let min = Money::from_units(i64::MIN);

        assert_eq!(max + Money::from_units(1), max);
        assert_eq!(min - Money::from_units(1), min);
        assert_eq!((-min).units(), i64::MAX);
        assert_eq!(min.abs().units(), i64::MAX);

        let mut c = max;
        c += max;
        assert_eq!(c, max);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_units).sum();
        assert_eq!(total.units(), 600);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_units(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().units(), 100);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_units(42)).unwrap();
        assert_eq!(json, "42");

        let back: Money = serde_json::from_str("-7").unwrap();
        assert_eq!(back.units(), -7);
    }
}
