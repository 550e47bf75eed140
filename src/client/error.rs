// Failure taxonomy for a catalog fetch.
// Display output is the message shown to the user.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Unreachable server, refused connection, timeout, broken body stream.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status.
    #[error("HTTP error: {status}{}", reason_suffix(.reason))]
    Http { status: u16, reason: String },

    /// Body did not decode into an envelope.
    #[error("data format error: {0}")]
    Format(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

fn reason_suffix(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {}", reason)
    }
}

impl FetchError {
    /// Classify a reqwest failure that happened while sending or reading.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            FetchError::Network(err.to_string())
        } else if err.is_decode() {
            FetchError::Format(err.to_string())
        } else {
            FetchError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Format(err.to_string())
    }
}
