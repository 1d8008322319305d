//! Error handling module
//!
//! Provides the unified error taxonomy for every facade operation.

use thiserror::Error;

/// Application-wide error type.
///
/// Every operation exposed by [`crate::ApiClient`] resolves to one of these
/// variants. `Validation` never reaches the network; `Auth` means the session
/// must be re-established; everything else that went over the wire collapses
/// into `RequestFailed`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication required: {0}")]
    Auth(String),

    #[error("Request failed{}: {message}", fmt_status(.status))]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({})", code),
        None => String::new(),
    }
}

impl ApiError {
    /// True for 401/403 responses and unusable session tokens; callers treat
    /// this as "send the operator back to login".
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Transport-level failures (refused connection, timeout, bad TLS) and
        // non-2xx statuses are one condition to callers.
        ApiError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for facade operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> ApiError {
    ApiError::Validation(msg.into())
}

/// Helper function to create an authentication error
pub fn auth_error(msg: impl Into<String>) -> ApiError {
    ApiError::Auth(msg.into())
}
