//! # GitLab Client
//!
//! A client for the GitLab REST API (v4) that hides pagination and schema
//! details behind two types:
//!
//! - **`WrappedValue`**: any JSON response as a navigable, read-only tree
//! - **`ApiResponse`**: a single object, or every page of a collection
//!   concatenated into one `PaginatedResult`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gitlab_client::{Client, ClientConfig, RequestOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::from_env()?)?;
//!
//!     // Follows Link: rel="next" until the last page
//!     let projects = client.get_all("/projects", RequestOptions::new().per_page(100)).await?;
//!     for project in &projects {
//!         println!("{}", project.field("path_with_namespace")?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Client: get / get_all / pages / post / put / delete      │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬────────────────┐
//! │  Pagination  │   Wrap                   │   HTTP         │
//! ├──────────────┼──────────────────────────┼────────────────┤
//! │ Link header  │ Object / Array / Scalar  │ Transport trait│
//! │ X-Total      │ strict field access      │ reqwest client │
//! │ page stream  │ dotted paths             │ rate limiting  │
//! └──────────────┴──────────────────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Navigable wrappers over JSON responses
pub mod wrap;

/// Transport seam and reqwest transport
pub mod http;

/// Link-header pagination
pub mod pagination;

/// Client configuration
pub mod config;

/// The client and its request helpers
pub mod client;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{url_encode, Client};
pub use config::ClientConfig;
pub use error::{Error, Result, StatusKind};
pub use http::{RequestOptions, Transport};
pub use pagination::{ApiResponse, FetchOptions, PageLinkSet, PaginatedResult};
pub use wrap::{wrap, WrappedObject, WrappedValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
