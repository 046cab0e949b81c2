//! The request seam between the API layer and an HTTP implementation
//!
//! Pagination and the request helpers only ever talk to a `Transport`, so
//! tests can script responses without a server.

use crate::error::Result;
use crate::types::{JsonValue, Method, QueryParams};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::collections::HashMap;

/// Options for a single request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters, sent in order
    pub query: QueryParams,
    /// Extra request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set `per_page`
    #[must_use]
    pub fn per_page(self, per_page: u32) -> Self {
        self.query("per_page", per_page)
    }

    /// Set `page`
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.query("page", page)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Same options without query parameters
    ///
    /// Used when following a `Link` URL, which already carries the full
    /// query string.
    #[must_use]
    pub fn without_query(&self) -> Self {
        Self {
            query: QueryParams::new(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

/// A successful (2xx) response with its body decoded
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Decoded body; `Null` for an empty body, `String` for non-JSON text
    pub body: JsonValue,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: JsonValue) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }
}

/// Issues one HTTP request
///
/// Implementations return `Error::HttpStatus` for any non-2xx response and
/// `Error::Http` when no response arrived. They must not retry on their own
/// behalf once an error is returned to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, options: &RequestOptions)
        -> Result<RawResponse>;
}

/// Decode a response body: empty → `Null`, JSON → value, otherwise text
pub fn decode_body(text: &str) -> JsonValue {
    if text.trim().is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}
