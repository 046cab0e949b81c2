//! Scripted transport for unit tests

use crate::error::{Error, Result};
use crate::http::{RawResponse, RequestOptions, Transport};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request as the transport saw it
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: Method,
    pub path: String,
    pub options: RequestOptions,
}

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with the given headers
    pub fn ok(self, body: JsonValue, headers: &[(&str, &str)]) -> Self {
        self.push(Ok(RawResponse::new(200, header_map(headers), body)))
    }

    /// Queue a non-2xx failure
    pub fn status(self, status: u16, message: &str) -> Self {
        self.push(Err(Error::http_status(status, "GET", "scripted", message)))
    }

    fn push(self, response: Result<RawResponse>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_paths(&self) -> Vec<String> {
        self.sent().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<RawResponse> {
        self.sent.lock().unwrap().push(SentRequest {
            method,
            path: path.to_string(),
            options: options.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other(format!("no scripted response for {path}"))))
    }
}

pub fn header_map(headers: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    map
}

/// `Link` header value pointing at `next`
pub fn next_link(next: &str) -> String {
    format!("<{next}>; rel=\"next\"")
}
