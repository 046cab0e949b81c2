//! HTTP module
//!
//! Provides the request seam (`Transport`) and its reqwest implementation.
//!
//! # Features
//!
//! - **Transport trait**: `send(method, path, options)` returning status,
//!   headers and decoded body, or an error for non-2xx
//! - **HttpClient**: reqwest transport with GitLab headers and messages
//! - **Rate Limiting**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;
mod transport;

pub use client::{error_message, HttpClient};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{decode_body, RawResponse, RequestOptions, Transport};

#[cfg(test)]
mod tests;
