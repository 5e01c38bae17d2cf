//! Error taxonomy for profile service calls.
//!
//! Every error is terminal to the single in-flight call: nothing is
//! retried here, and nothing is fatal to the caller - the next call
//! starts fresh.

use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur when talking to the profile service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connection, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response carried a body that does not match the
    /// contract.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service answered with a non-2xx status. `message` is the
    /// response body text or its structured `message` field when one
    /// could be read, otherwise a generic `"<Action> failed (<status>)"`.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },

    /// The service answered 2xx but declared the operation unsuccessful
    /// (e.g., `success: false` on login).
    #[error("{0}")]
    Rejected(String),

    /// Local validation failed before any network call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The session cache could not be written or cleared.
    #[error("session store error: {0}")]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Build the non-2xx error for an action, preferring the server's
    /// own words and falling back to `"<Action> failed (<status>)"`.
    #[must_use]
    pub fn api(action: &str, status: u16, body_message: Option<String>) -> Self {
        let message = body_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("{action} failed ({status})"));
        Self::Api { status, message }
    }
}
