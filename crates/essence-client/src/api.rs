//! # Store API Client
//!
//! Thin typed wrapper over the store's REST API.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ApiClient::daily_summary(date)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  request()  ── base_url + path                                          │
//! │             ── Authorization: Bearer <SessionState token>               │
//! │             ── X-Request-Id: <uuid v4>                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send()     ── transport error ──► Network / Timeout                    │
//! │             ── 401/403 ──────────► Unauthorized                         │
//! │             ── 404 ──────────────► NotFound                             │
//! │             ── other non-2xx ────► Status { status, message }           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read_json() ── "" / null ──► None                                      │
//! │              ── *Wire ──TryFrom──► domain type                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is attempted exactly once.

use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::NaiveDate;
use essence_core::{CashSession, ClosingRecord, DailySummary, Money};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::state::SessionState;
use crate::wire::{
    ApiErrorBody, CashSessionWire, CloseSessionRequest, ClosingRecordWire, ClosingRequest,
    DailySummaryWire, ListEnvelope, OpenSessionRequest,
};

const USER_AGENT: &str = concat!("essence-pos/", env!("CARGO_PKG_VERSION"));
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Strips trailing slashes so paths can be appended with a leading `/`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Fallback text for a status whose body carried no message.
fn status_text(status: StatusCode) -> String {
    match status.as_u16() {
        401 => "Token is missing, invalid or expired".to_string(),
        403 => "This account may not perform cash closings".to_string(),
        404 => "Endpoint not found".to_string(),
        409 => "The request conflicts with existing data".to_string(),
        s if s >= 500 => format!("Store server error (HTTP {s})"),
        s => format!("Unexpected response from the store server (HTTP {s})"),
    }
}

// =============================================================================
// Client
// =============================================================================

/// REST client for the store API.
///
/// Cheap to clone: the underlying `reqwest::Client` and the session state
/// are both reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionState,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// A token in the configuration is copied into the session state unless
    /// the state already holds one.
    pub fn new(config: &ClientConfig, session: SessionState) -> ClientResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;

        if !session.is_authenticated() {
            session.set_token(config.token().map(str::to_string));
        }

        let base_url = normalize_base_url(&config.api.base_url);
        info!(base_url = %base_url, timeout_secs = config.api.timeout_secs, "Store API client ready");

        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Fetches the aggregated figures for one business day.
    ///
    /// Returns `None` when the API has no summary for the date.
    pub async fn daily_summary(&self, date: NaiveDate) -> ClientResult<Option<DailySummary>> {
        let request = self
            .request(Method::GET, "/reports/daily-summary")
            .query(&[("date", date.format("%Y-%m-%d").to_string())]);

        let wire: Option<DailySummaryWire> =
            match self.send(request, &format!("Daily summary for {date}")).await {
                Ok(response) => read_json(response).await?,
                Err(ClientError::NotFound(_)) => None,
                Err(e) => return Err(e),
            };

        wire.map(|w| w.into_domain(date)).transpose()
    }

    // =========================================================================
    // Cash Sessions
    // =========================================================================

    /// Fetches the open cash session and records it in the session state.
    pub async fn active_session(&self) -> ClientResult<Option<CashSession>> {
        let request = self.request(Method::GET, "/cash-sessions/active");

        let wire: Option<CashSessionWire> = match self.send(request, "Active cash session").await {
            Ok(response) => read_json(response).await?,
            Err(ClientError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let session = wire.map(CashSession::try_from).transpose()?;
        self.session.set_active_session(session.clone());
        Ok(session)
    }

    /// Opens a cash session with the given float.
    pub async fn open_session(
        &self,
        opening_cash: Money,
        notes: Option<String>,
    ) -> ClientResult<CashSession> {
        let body = OpenSessionRequest { opening_cash, notes };
        let request = self.request(Method::POST, "/cash-sessions/open").json(&body);

        let response = self.send(request, "Cash session endpoint").await?;
        let wire: CashSessionWire = require_json(response, "cash session").await?;
        let session = CashSession::try_from(wire)?;

        info!(session_id = %session.id, opening_cash = %session.opening_cash, "Cash session opened");
        self.session.set_active_session(Some(session.clone()));
        Ok(session)
    }

    /// Closes a cash session with the counted amount.
    pub async fn close_session(
        &self,
        id: &str,
        closing_cash: Money,
        notes: Option<String>,
    ) -> ClientResult<CashSession> {
        let body = CloseSessionRequest { closing_cash, notes };
        let request = self
            .request(Method::POST, &format!("/cash-sessions/{id}/close"))
            .json(&body);

        let response = self.send(request, &format!("Cash session {id}")).await?;
        let wire: CashSessionWire = require_json(response, "cash session").await?;
        let session = CashSession::try_from(wire)?;

        info!(session_id = %session.id, "Cash session closed");
        self.session.set_active_session(None);
        Ok(session)
    }

    // =========================================================================
    // Cash Closings
    // =========================================================================

    /// Persists a finalized closing.
    pub async fn submit_closing(&self, closing: &ClosingRequest) -> ClientResult<ClosingRecord> {
        let request = self.request(Method::POST, "/cash-closings").json(closing);

        let response = self.send(request, "Cash closing endpoint").await?;
        let wire: ClosingRecordWire = require_json(response, "closing record").await?;
        let record = ClosingRecord::try_from(wire)?;

        info!(
            closing_id = %record.id,
            date = %record.date,
            difference = %record.difference,
            "Cash closing recorded"
        );
        Ok(record)
    }

    /// Lists closings between two dates, inclusive.
    pub async fn closing_history(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ClientResult<Vec<ClosingRecord>> {
        essence_core::validation::validate_date_range(from, to)?;

        let request = self.request(Method::GET, "/cash-closings").query(&[
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ]);

        let response = self.send(request, "Closing history").await?;
        let wire: Option<ListEnvelope<ClosingRecordWire>> = read_json(response).await?;

        wire.map(ListEnvelope::into_items)
            .unwrap_or_default()
            .into_iter()
            .map(ClosingRecord::try_from)
            .collect()
    }

    /// Downloads the PDF report of a day's closing.
    pub async fn closing_report_pdf(&self, date: NaiveDate) -> ClientResult<Bytes> {
        let path = format!("/cash-closings/{}/report.pdf", date.format("%Y-%m-%d"));
        let request = self
            .request(Method::GET, &path)
            .header(reqwest::header::ACCEPT, "application/pdf");

        let response = self
            .send(request, &format!("Closing report for {date}"))
            .await?;
        let bytes = response.bytes().await?;

        debug!(date = %date, size = bytes.len(), "Closing report downloaded");
        Ok(bytes)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Pings the API and returns the round-trip time.
    pub async fn health(&self) -> ClientResult<Duration> {
        let start = Instant::now();
        self.send(self.request(Method::GET, "/health"), "Health endpoint")
            .await?;
        let latency = start.elapsed();

        info!(latency_ms = latency.as_millis() as u64, "Store API reachable");
        Ok(latency)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4();
        debug!(%method, %url, %request_id, "Store API request");

        let builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.to_string());

        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses to errors.
    ///
    /// `what` names the resource for `NotFound`.
    async fn send(&self, request: RequestBuilder, what: &str) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Store API response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| status_text(status));

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(what.to_string()),
            _ => ClientError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Decodes a JSON body. Empty bodies and `null` read as `None`.
async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<Option<T>> {
    let text = response.text().await?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Like [`read_json`], for endpoints that must return a body.
async fn require_json<T: DeserializeOwned>(
    response: Response,
    entity: &'static str,
) -> ClientResult<T> {
    read_json(response)
        .await?
        .ok_or_else(|| ClientError::InvalidPayload {
            entity,
            reason: "empty response body".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://x/api/"), "http://x/api");
        assert_eq!(normalize_base_url(" http://x/api// "), "http://x/api");
        assert_eq!(normalize_base_url("http://x"), "http://x");
    }

    #[test]
    fn test_status_text() {
        assert!(status_text(StatusCode::UNAUTHORIZED).contains("expired"));
        assert!(status_text(StatusCode::BAD_GATEWAY).contains("502"));
        assert!(status_text(StatusCode::IM_A_TEAPOT).contains("418"));
    }

    #[test]
    fn test_new_copies_config_token() {
        let mut config = ClientConfig::default();
        config.api.token = Some("from-config".to_string());

        let session = SessionState::new();
        let client = ApiClient::new(&config, session.clone()).unwrap();
        assert_eq!(session.token().as_deref(), Some("from-config"));
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_new_keeps_existing_token() {
        let mut config = ClientConfig::default();
        config.api.token = Some("from-config".to_string());

        let session = SessionState::with_token("signed-in");
        ApiClient::new(&config, session.clone()).unwrap();
        assert_eq!(session.token().as_deref(), Some("signed-in"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(ApiClient::new(&config, SessionState::new()).is_err());
    }
}
