//! # CLI Error Type
//!
//! What a failed command prints and which exit code it returns.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ClientError / CoreError ──► CliError { code, message, retryable }     │
//! │                                   │                                     │
//! │                 ┌─────────────────┴──────────────────┐                  │
//! │                 ▼                                    ▼                  │
//! │        stderr: "error: <message>"          --json: {"code": ...}        │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │        exit code per ErrorCode                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use essence_client::ClientError;
use essence_core::CoreError;
use serde::Serialize;

/// Error reported by a CLI command.
///
/// ```json
/// {
///   "code": "NO_SALES",
///   "message": "No sales recorded for 2024-03-01; the day cannot be closed",
///   "retryable": false
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
    /// Trying again later might succeed.
    pub retryable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected before anything was sent.
    ValidationError,
    /// The day has no sales and cannot be closed.
    NoSales,
    /// Register state does not allow the operation.
    SessionState,
    NotFound,
    Unauthorized,
    /// Server unreachable or failing.
    Network,
    /// Server answered with something unusable.
    BadResponse,
    Config,
    Internal,
}

impl ErrorCode {
    /// Process exit code.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::ValidationError | ErrorCode::NoSales | ErrorCode::SessionState => 2,
            ErrorCode::Config => 3,
            ErrorCode::Unauthorized => 4,
            ErrorCode::NotFound => 5,
            ErrorCode::Network | ErrorCode::BadResponse => 6,
            ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::NoSalesRecorded { .. } => ErrorCode::NoSales,
            CoreError::SessionNotOpen | CoreError::SessionAlreadyOpen { .. } => {
                ErrorCode::SessionState
            }
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        if let ClientError::Core(core) = err {
            return core.into();
        }

        let code = match &err {
            e if e.is_config_error() => ErrorCode::Config,
            ClientError::Unauthorized(_) => ErrorCode::Unauthorized,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Network(_) | ClientError::Timeout | ClientError::Status { .. } => {
                ErrorCode::Network
            }
            ClientError::InvalidPayload { reason, .. } => {
                tracing::error!(%reason, "Store API payload rejected");
                ErrorCode::BadResponse
            }
            ClientError::Deserialize(e) => {
                tracing::error!(error = %e, "Store API response could not be decoded");
                ErrorCode::BadResponse
            }
            _ => ErrorCode::Internal,
        };

        CliError {
            code,
            message: err.user_message(),
            retryable: err.is_transient(),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if self.retryable {
            write!(f, " (try again)")?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use essence_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: CliError = CoreError::NoSalesRecorded {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NoSales);
        assert_eq!(err.code.exit_code(), 2);

        let err: CliError = CoreError::Validation(ValidationError::Required {
            field: "closing cash".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_client_errors_map_to_codes() {
        let err: CliError = ClientError::Timeout.into();
        assert_eq!(err.code, ErrorCode::Network);
        assert!(err.retryable);
        assert!(err.to_string().ends_with("(try again)"));

        let err: CliError = ClientError::Unauthorized("expired".into()).into();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(!err.retryable);

        let err: CliError = ClientError::InvalidUrl("ftp://x".into()).into();
        assert_eq!(err.code, ErrorCode::Config);

        let err: CliError = ClientError::Core(CoreError::SessionNotOpen).into();
        assert_eq!(err.code, ErrorCode::SessionState);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(CliError::new(ErrorCode::NoSales, "nothing sold")).unwrap();
        assert_eq!(json["code"], "NO_SALES");
        assert_eq!(json["retryable"], false);
    }
}
