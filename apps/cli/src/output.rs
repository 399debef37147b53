//! # Output Formatting
//!
//! Plain-text rendering of domain types. Every function returns a `String`
//! so the layout can be tested without capturing stdout.

use std::fmt::Write;

use essence_core::reconciliation::Severity;
use essence_core::{
    CashCheck, CashSession, ClosingRecord, DailySummary, Money, Reconciliation,
    VarianceDirection, REVIEW_THRESHOLD,
};

/// Renders amounts with the store's currency symbol.
#[derive(Debug, Clone)]
pub struct Formatter {
    symbol: String,
}

impl Formatter {
    pub fn new(symbol: impl Into<String>) -> Self {
        Formatter {
            symbol: symbol.into(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.symbol)
    }

    fn line(&self, out: &mut String, label: &str, amount: Money) {
        let _ = writeln!(out, "  {:<20}{:>16}", label, self.money(amount));
    }

    // =========================================================================
    // Daily Summary
    // =========================================================================

    pub fn summary(&self, summary: &DailySummary) -> String {
        let mut out = format!("Daily summary for {}\n", summary.date);
        self.line(&mut out, "Cash sales", summary.cash_sales);
        self.line(&mut out, "Card sales", summary.card_sales);
        self.line(&mut out, "Transfer sales", summary.transfer_sales);
        self.line(&mut out, "Credit sales", summary.credit_sales);
        self.line(&mut out, "Non-cash sales", summary.non_cash_sales());
        self.line(&mut out, "Total sales", summary.total_sales);
        out.push('\n');
        self.line(&mut out, "Other income", summary.total_income);
        self.line(&mut out, "Expenses", summary.total_expense);
        self.line(&mut out, "Supplier payments", summary.total_payments);
        out
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    pub fn cash_check(&self, check: &CashCheck) -> String {
        match check {
            CashCheck::NoData => {
                "No summary available for this day; nothing to reconcile.\n".to_string()
            }
            CashCheck::Ready(result) => self.reconciliation(result),
        }
    }

    pub fn reconciliation(&self, result: &Reconciliation) -> String {
        let mut out = String::new();
        self.line(&mut out, "Opening cash", result.opening_cash);
        self.line(&mut out, "Expected cash", result.expected_cash);
        self.line(&mut out, "Counted cash", result.closing_cash);
        self.line(&mut out, "Difference", result.difference);

        let marker = match result.tier.severity() {
            Severity::Success => "OK",
            Severity::Warning => "!",
            Severity::Error => "!!",
        };
        let direction = match result.direction {
            VarianceDirection::Surplus => " (surplus)",
            VarianceDirection::Shortage => " (shortage)",
            VarianceDirection::Even => "",
        };
        let _ = writeln!(out, "  [{marker}] {}{direction}", result.tier.label());

        if result.review_advised {
            let _ = writeln!(
                out,
                "  Variance above {}; a manager should review this closing.",
                self.money(Money::from_units(REVIEW_THRESHOLD))
            );
        }
        out
    }

    // =========================================================================
    // Sessions and Closings
    // =========================================================================

    pub fn session(&self, session: Option<&CashSession>) -> String {
        let Some(session) = session else {
            return "No cash session is open.\n".to_string();
        };

        let mut out = format!(
            "Session {} ({})\n  Opened {}",
            session.id,
            if session.is_open() { "open" } else { "closed" },
            session.opened_at.format("%Y-%m-%d %H:%M UTC")
        );
        if let Some(by) = &session.opened_by {
            let _ = write!(out, " by {by}");
        }
        out.push('\n');
        self.line(&mut out, "Opening cash", session.opening_cash);
        if let Some(closing) = session.closing_cash {
            self.line(&mut out, "Closing cash", closing);
        }
        out
    }

    pub fn history(&self, records: &[ClosingRecord]) -> String {
        if records.is_empty() {
            return "No closings in this range.\n".to_string();
        }

        let mut out = format!(
            "{:<12}{:>16}{:>16}{:>16}  {}\n",
            "Date", "Expected", "Counted", "Difference", "Result"
        );
        for record in records {
            let result = Reconciliation::from_record(record);
            let _ = writeln!(
                out,
                "{:<12}{:>16}{:>16}{:>16}  {}{}",
                record.date.to_string(),
                self.money(record.system_cash),
                self.money(record.closing_cash),
                self.money(record.difference),
                result.tier.label(),
                if result.is_consistent() { "" } else { " (difference does not match)" }
            );
        }

        let net: Money = records.iter().map(|r| r.difference).sum();
        let _ = writeln!(out, "\nNet difference: {}", self.money(net));
        out
    }
}
