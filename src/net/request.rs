//! Typed request builder shared by every API call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Endpoint functions in `api` describe *what* to send as an [`ApiRequest`];
//! a [`Transport`](super::transport::Transport) decides *how*. Payload
//! construction, query parameters and response expectations are therefore
//! defined once here rather than re-implemented per endpoint.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde::Serialize;

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A file attached to a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One named field of a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FilePart },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// How the response body should be handed back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expect {
    /// Parse as JSON into the caller's type.
    #[default]
    Json,
    /// Return raw bytes for a client-side download.
    Binary,
}

/// Percent-encode `value` for use as a single URL path segment.
///
/// Only RFC 3986 unreserved characters pass through, so an id containing
/// `/`, `?` or `#` cannot change which route is hit. Query parameters are
/// encoded by the transport.
#[must_use]
pub fn segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// A fully described backend call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    pub expect: Expect,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self { method, path, query: Vec::new(), body: Body::Empty, expect: Expect::Json }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::new(format!("invalid request: {e}")))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// Expect a binary download instead of JSON.
    #[must_use]
    pub fn binary(mut self) -> Self {
        self.expect = Expect::Binary;
        self
    }

    /// Absolute URL (without query string) under `base`.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }
}
