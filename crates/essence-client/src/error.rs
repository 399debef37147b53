//! # Client Error Types
//!
//! Error types for calls to the store API.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     API                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Unauthorized           │ │
//! │  │  ConfigLoad...  │  │  Timeout        │  │  NotFound               │ │
//! │  │  InvalidUrl     │  │                 │  │  Status                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │   Boundary      │  │    Domain       │                              │
//! │  │                 │  │                 │                              │
//! │  │  InvalidPayload │  │  Core(..)       │                              │
//! │  │  Deserialize    │  │                 │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried. A failed call is reported once through
//! [`ClientError::user_message`] and the user decides whether to try again.

use essence_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every failure a store API call can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The API could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The API did not answer in time.
    #[error("Request to the store API timed out")]
    Timeout,

    // =========================================================================
    // API Errors
    // =========================================================================
    /// Missing, invalid or expired token.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("Store API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    // =========================================================================
    // Boundary Errors
    // =========================================================================
    /// JSON was well-formed but failed domain validation.
    #[error("Invalid {entity} payload: {reason}")]
    InvalidPayload { entity: &'static str, reason: String },

    /// JSON could not be decoded at all.
    #[error("Could not decode response: {0}")]
    Deserialize(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Local file I/O (report download).
    #[error("I/O error: {0}")]
    Io(String),

    /// Business rule or validation failure before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<essence_core::ValidationError> for ClientError {
    fn from(err: essence_core::ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Deserialize(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Deserialize(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true if trying the same call again later might succeed.
    ///
    /// The client never retries on its own; front ends use this to decide
    /// whether to keep the form open with a "try again" hint.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout => true,
            ClientError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// Short notification text for the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => "Cannot reach the store server".to_string(),
            ClientError::Timeout => "The store server did not respond in time".to_string(),
            ClientError::Unauthorized(_) => "Your session has expired, sign in again".to_string(),
            ClientError::NotFound(what) => format!("{what} was not found"),
            ClientError::Status { status, message } if *status >= 500 => {
                format!("Store server error (HTTP {status}): {message}")
            }
            ClientError::Status { message, .. } => message.clone(),
            ClientError::InvalidPayload { .. } | ClientError::Deserialize(_) => {
                "The store server sent data this client does not understand".to_string()
            }
            ClientError::Core(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}
