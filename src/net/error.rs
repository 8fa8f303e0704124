//! The client's single error type for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Failures are flat: every error carries one human-readable message, taken
//! from the backend's `detail` field when present. Callers catch at the UI
//! handler that triggered the request and show the message inline. Nothing
//! here distinguishes retryable from permanent failures.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// A failed API call. `Display` is exactly the message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, when a response was received at all.
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }

    /// Build the error for a non-2xx response.
    ///
    /// The message is the body's `detail` string if it has one, else the
    /// status text, else `HTTP {status}`.
    pub fn from_response(status: u16, status_text: &str, body: &[u8]) -> Self {
        let message = detail_message(body)
            .or_else(|| {
                let text = status_text.trim();
                (!text.is_empty()).then(|| text.to_owned())
            })
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self { status: Some(status), message }
    }

    /// The request never reached the backend.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::new(err.to_string())
    }

    /// A 2xx body that could not be decoded into the expected type.
    pub fn decode(err: &serde_json::Error) -> Self {
        Self::new(format!("invalid response: {err}"))
    }

    /// Browser-only call made outside the browser.
    pub fn unavailable() -> Self {
        Self::new("not available outside the browser")
    }
}

fn detail_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}
