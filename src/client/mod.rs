//! The GitLab client
//!
//! A `Client` is built once by the caller and passed wherever API calls are
//! made. It owns the transport and the configuration; every request helper
//! is a plain method.
//!
//! ```rust,ignore
//! use gitlab_client::{Client, ClientConfig, RequestOptions};
//!
//! let client = Client::new(ClientConfig::from_env()?)?;
//! let issues = client
//!     .get("/projects/gitlab-org%2Fgitlab/issues", RequestOptions::new().per_page(100))
//!     .await?;
//! ```

mod requests;

pub use requests::{url_encode, Client};
