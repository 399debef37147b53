//! Property-based tests for the cash reconciliation laws.

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::money::Money;
use crate::reconciliation::{
    classify_variance, expected_cash, reconcile, review_advised, CashCheck, VarianceTier,
};
use crate::types::DailySummary;
use crate::{MINOR_VARIANCE_LIMIT, REVIEW_THRESHOLD};

/// Amounts a small shop could plausibly see in a day.
fn amount() -> impl Strategy<Value = Money> {
    (0i64..1_000_000_000i64).prop_map(Money::from_units)
}

fn summary_strategy() -> impl Strategy<Value = DailySummary> {
    (amount(), amount(), amount(), amount(), amount(), amount()).prop_map(
        |(cash, card, income, expense, payments, transfer)| DailySummary {
            cash_sales: cash,
            card_sales: card,
            transfer_sales: transfer,
            total_income: income,
            total_expense: expense,
            total_payments: payments,
            total_sales: cash + card + transfer,
            ..DailySummary::empty(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// difference == closing - expected, for any inputs.
    #[test]
    fn prop_difference_identity(
        opening in amount(),
        closing in amount(),
        summary in summary_strategy(),
    ) {
        let result = reconcile(opening, &summary, closing);
        prop_assert_eq!(result.expected_cash, expected_cash(opening, &summary));
        prop_assert_eq!(result.difference, closing - result.expected_cash);
    }

    /// Counting exactly the expected amount is always balanced.
    #[test]
    fn prop_exact_count_is_balanced(opening in amount(), summary in summary_strategy()) {
        let expected = expected_cash(opening, &summary);
        let result = reconcile(opening, &summary, expected);
        prop_assert_eq!(result.tier, VarianceTier::Balanced);
        prop_assert!(!result.review_advised);
    }

    /// Same inputs, same output.
    #[test]
    fn prop_idempotent(
        opening in amount(),
        closing in amount(),
        summary in summary_strategy(),
    ) {
        let first = CashCheck::evaluate(opening, Some(&summary), closing);
        let second = CashCheck::evaluate(opening, Some(&summary), closing);
        prop_assert_eq!(first, second);
    }

    /// Tier and advisory depend only on the magnitude of the difference.
    #[test]
    fn prop_tier_is_symmetric(diff in 0i64..50_000i64) {
        let up = Money::from_units(diff);
        let down = Money::from_units(-diff);
        prop_assert_eq!(classify_variance(up), classify_variance(down));
        prop_assert_eq!(review_advised(up), review_advised(down));
    }

    /// Tier follows the thresholds; the advisory follows its own.
    #[test]
    fn prop_tier_thresholds(diff in -50_000i64..50_000i64) {
        let money = Money::from_units(diff);
        let magnitude = diff.abs();

        let expected_tier = if magnitude == 0 {
            VarianceTier::Balanced
        } else if magnitude <= MINOR_VARIANCE_LIMIT {
            VarianceTier::MinorVariance
        } else {
            VarianceTier::SignificantVariance
        };

        prop_assert_eq!(classify_variance(money), expected_tier);
        prop_assert_eq!(review_advised(money), magnitude > REVIEW_THRESHOLD);
    }

    /// Without a summary nothing is computed.
    #[test]
    fn prop_missing_summary_is_no_data(opening in amount(), closing in amount()) {
        prop_assert_eq!(CashCheck::evaluate(opening, None, closing), CashCheck::NoData);
    }
}
