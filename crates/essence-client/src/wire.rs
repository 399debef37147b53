//! # Wire Types
//!
//! JSON shapes exchanged with the store API and their conversion into
//! essence-core domain types.
//!
//! ## Boundary Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP body ──serde──► *Wire struct ──TryFrom──► domain type             │
//! │                        (loose)                   (strict)               │
//! │                                                                         │
//! │  Loose:  amounts may be numbers, numeric strings or null                │
//! │          ids may be strings or integers                                 │
//! │          dates may be "2024-03-01" or a full RFC 3339 timestamp         │
//! │                                                                         │
//! │  Strict: amounts are whole-unit Money, finite, within ±2^53             │
//! │          summary and count amounts are non-negative                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No arithmetic runs on a payload until it has been through this module.

use chrono::{DateTime, NaiveDate, Utc};
use essence_core::reconciliation::FinalizedClosing;
use essence_core::{
    CashSession, ClosingRecord, DailySummary, Money, SessionStatus, MAX_AMOUNT_UNITS,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Largest magnitude a JSON number can carry without losing whole units.
const MAX_WIRE_UNITS: f64 = MAX_AMOUNT_UNITS as f64;

/// Rounding drift above this is logged; the store should send whole units.
const DRIFT_TOLERANCE: f64 = 0.01;

// =============================================================================
// Loose Scalars
// =============================================================================

/// A monetary amount as the API sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireAmount {
    Number(f64),
    Text(String),
}

impl WireAmount {
    fn as_f64(&self) -> Option<f64> {
        match self {
            WireAmount::Number(n) => Some(*n),
            WireAmount::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

/// An identifier as the API sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

/// Whether a field may legitimately be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    NonNegative,
    Any,
}

/// Converts one wire amount into whole-unit Money.
fn money(
    entity: &'static str,
    field: &str,
    raw: Option<&WireAmount>,
    sign: Sign,
) -> ClientResult<Money> {
    let Some(raw) = raw else {
        return Ok(Money::zero());
    };

    let invalid = |reason: String| ClientError::InvalidPayload { entity, reason };

    let value = raw
        .as_f64()
        .ok_or_else(|| invalid(format!("{field} is not a number: {raw:?}")))?;

    if !value.is_finite() {
        return Err(invalid(format!("{field} is not finite")));
    }

    let rounded = value.round();
    if rounded.abs() > MAX_WIRE_UNITS {
        return Err(invalid(format!("{field} is out of range: {value}")));
    }

    let drift = (value - rounded).abs();
    if drift > DRIFT_TOLERANCE {
        warn!(entity, field, value, rounded, "Rounding fractional amount to whole units");
    }

    if sign == Sign::NonNegative && rounded < 0.0 {
        return Err(invalid(format!("{field} must not be negative")));
    }

    Ok(Money::from_units(rounded as i64))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part in UTC).
fn flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(&raw).map_err(serde::de::Error::custom)
}

fn parse_flexible_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .map_err(|_| format!("invalid date: {raw}"))
}

// =============================================================================
// Daily Summary
// =============================================================================

/// Daily summary as returned by `GET /reports/daily-summary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailySummaryWire {
    pub cash_sales: Option<WireAmount>,
    pub card_sales: Option<WireAmount>,
    pub transfer_sales: Option<WireAmount>,
    pub credit_sales: Option<WireAmount>,
    pub total_income: Option<WireAmount>,
    pub total_expense: Option<WireAmount>,
    pub total_payments: Option<WireAmount>,
    pub total_sales: Option<WireAmount>,
}

impl DailySummaryWire {
    /// Validates the payload for the day it was requested for.
    ///
    /// Missing or null amounts count as zero.
    pub fn into_domain(self, date: NaiveDate) -> ClientResult<DailySummary> {
        const ENTITY: &str = "daily summary";
        let field = |name: &str, raw: &Option<WireAmount>| {
            money(ENTITY, name, raw.as_ref(), Sign::NonNegative)
        };

        Ok(DailySummary {
            date,
            cash_sales: field("cashSales", &self.cash_sales)?,
            card_sales: field("cardSales", &self.card_sales)?,
            transfer_sales: field("transferSales", &self.transfer_sales)?,
            credit_sales: field("creditSales", &self.credit_sales)?,
            total_income: field("totalIncome", &self.total_income)?,
            total_expense: field("totalExpense", &self.total_expense)?,
            total_payments: field("totalPayments", &self.total_payments)?,
            total_sales: field("totalSales", &self.total_sales)?,
        })
    }
}

// =============================================================================
// Cash Session
// =============================================================================

/// Cash session as returned by the `/cash-sessions` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashSessionWire {
    pub id: WireId,
    pub opening_cash: Option<WireAmount>,
    pub opened_at: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closing_cash: Option<WireAmount>,
    #[serde(default)]
    pub opened_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<CashSessionWire> for CashSession {
    type Error = ClientError;

    fn try_from(wire: CashSessionWire) -> ClientResult<Self> {
        const ENTITY: &str = "cash session";

        let status = match wire.status.trim().to_lowercase().as_str() {
            "open" | "active" => SessionStatus::Open,
            "closed" => SessionStatus::Closed,
            other => {
                return Err(ClientError::InvalidPayload {
                    entity: ENTITY,
                    reason: format!("unknown status '{other}'"),
                })
            }
        };

        let closing_cash = match wire.closing_cash.as_ref() {
            Some(raw) => Some(money(ENTITY, "closingCash", Some(raw), Sign::NonNegative)?),
            None => None,
        };

        Ok(CashSession {
            id: wire.id.into(),
            opening_cash: money(
                ENTITY,
                "openingCash",
                wire.opening_cash.as_ref(),
                Sign::NonNegative,
            )?,
            opened_at: wire.opened_at,
            status,
            closed_at: wire.closed_at,
            closing_cash,
            opened_by: wire.opened_by,
            notes: wire.notes,
        })
    }
}

// =============================================================================
// Closing Record
// =============================================================================

/// Closing record as returned by the `/cash-closings` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingRecordWire {
    pub id: WireId,
    #[serde(deserialize_with = "flexible_date")]
    pub date: NaiveDate,
    pub opening_cash: Option<WireAmount>,
    pub closing_cash: Option<WireAmount>,
    pub system_cash: Option<WireAmount>,
    /// Older records were stored without it.
    #[serde(default)]
    pub difference: Option<WireAmount>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_by: Option<String>,
}

impl TryFrom<ClosingRecordWire> for ClosingRecord {
    type Error = ClientError;

    fn try_from(wire: ClosingRecordWire) -> ClientResult<Self> {
        const ENTITY: &str = "closing record";

        let amount = |field: &str, raw: &Option<WireAmount>, sign: Sign| {
            money(ENTITY, field, raw.as_ref(), sign)
        };

        let opening_cash = amount("openingCash", &wire.opening_cash, Sign::NonNegative)?;
        let closing_cash = amount("closingCash", &wire.closing_cash, Sign::NonNegative)?;
        let system_cash = amount("systemCash", &wire.system_cash, Sign::Any)?;
        let difference = match wire.difference {
            Some(_) => amount("difference", &wire.difference, Sign::Any)?,
            None => closing_cash - system_cash,
        };

        Ok(ClosingRecord {
            id: wire.id.into(),
            date: wire.date,
            opening_cash,
            closing_cash,
            system_cash,
            difference,
            notes: wire.notes,
            created_at: wire.created_at,
            closed_by: wire.closed_by,
        })
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /cash-sessions/open`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub opening_cash: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /cash-sessions/{id}/close`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionRequest {
    pub closing_cash: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /cash-closings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingRequest {
    pub date: NaiveDate,
    pub opening_cash: Money,
    pub closing_cash: Money,
    pub system_cash: Money,
    pub difference: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&FinalizedClosing> for ClosingRequest {
    fn from(closing: &FinalizedClosing) -> Self {
        ClosingRequest {
            date: closing.date,
            opening_cash: closing.opening_cash,
            closing_cash: closing.closing_cash,
            system_cash: closing.system_cash,
            difference: closing.difference,
            notes: closing.notes.clone(),
        }
    }
}

/// List responses come either bare or wrapped in `{"data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

/// Error body the API sends with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}
