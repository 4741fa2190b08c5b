//! Failures on the fetch and run paths.
//!
//! The dashboard never lets these escape: each one is rendered into the page
//! as an inline message.

use thiserror::Error;

/// Longest slice of a non-success response body quoted in an error message.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, bad URL).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status and no usable body.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape expected.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let body = if trimmed.is_empty() {
            "empty response".to_string()
        } else if trimmed.chars().count() > BODY_EXCERPT_CHARS {
            let excerpt: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
            format!("{excerpt}...")
        } else {
            trimmed.to_string()
        };
        Self::Status { status, body }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
