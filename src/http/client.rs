//! reqwest-backed transport
//!
//! Provides the HTTP client that handles:
//! - URL building against the configured endpoint
//! - `PRIVATE-TOKEN` / `Sudo` / `User-Agent` headers
//! - Optional client-side rate limiting
//! - Turning non-2xx responses into `Error::HttpStatus` with GitLab's message

use super::rate_limit::RateLimiter;
use super::transport::{decode_body, RawResponse, RequestOptions, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// HTTP transport for one GitLab instance
pub struct HttpClient {
    client: Client,
    endpoint: Url,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client from the client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(Self::default_headers(config)?)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        })
    }

    fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.private_token {
            let mut value = HeaderValue::from_str(token).map_err(|_| {
                Error::invalid_value("private_token", "contains characters not allowed in a header")
            })?;
            value.set_sensitive(true);
            headers.insert("private-token", value);
        }

        if let Some(sudo) = &config.sudo {
            let value = HeaderValue::from_str(sudo).map_err(|_| {
                Error::invalid_value("sudo", "contains characters not allowed in a header")
            })?;
            headers.insert("sudo", value);
        }

        Ok(headers)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Build full URL from path
    ///
    /// Absolute URLs (from `Link` headers) are used verbatim; anything else
    /// is appended to the endpoint, keeping its `/api/v4` prefix.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        let base = self.endpoint.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<RawResponse> {
        let url = self.build_url(path)?;

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.into(), url.clone());

        for (key, value) in &options.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !options.query.is_empty() {
            req = req.query(&options.query);
        }

        if let Some(ref body) = options.body {
            req = req.json(body);
        }

        debug!("{method} {url}");

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        if !status.is_success() {
            debug!("{method} {url} failed with {}", status.as_u16());
            return Err(Error::http_status(
                status.as_u16(),
                method.as_str(),
                url.as_str(),
                error_message(&text, status.canonical_reason()),
            ));
        }

        debug!("{method} {url} -> {}", status.as_u16());
        Ok(RawResponse::new(status.as_u16(), headers, decode_body(&text)))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Build a readable message from an error response body
///
/// GitLab puts it under `message`, `error` or `error_description`. A
/// validation failure arrives as an object of field → messages, which is
/// flattened to `'field' msg msg, 'other' msg`.
pub fn error_message(body: &str, reason: Option<&str>) -> String {
    let fallback = || {
        let text = body.trim();
        if text.is_empty() {
            reason.unwrap_or("no message").to_string()
        } else {
            text.to_string()
        }
    };

    let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(body) else {
        return fallback();
    };

    ["message", "error", "error_description"]
        .iter()
        .find_map(|key| map.get(*key))
        .map_or_else(fallback, flatten_message)
}

fn flatten_message(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items.iter().map(flatten_message).collect::<Vec<_>>().join(" "),
        JsonValue::Object(map) => map
            .iter()
            .map(|(field, msg)| format!("'{field}' {}", flatten_message(msg)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
