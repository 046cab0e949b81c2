//! Response wrapping
//!
//! Turns arbitrary decoded JSON into a read-only structure that can be
//! navigated by attribute name, array index or dotted path, without a
//! schema.
//!
//! # Missing attributes
//!
//! Access is strict: `WrappedValue::field` and `WrappedObject::get` return
//! `Error::NoSuchAttribute` for a key the response does not contain, so a
//! typo never reads as an absent value. `get_opt` is the explicit
//! permissive form.
//!
//! ```rust
//! use gitlab_client::wrap::wrap;
//! use serde_json::json;
//!
//! let issue = wrap(json!({"iid": 7, "labels": [{"name": "bug"}]}));
//! assert_eq!(*issue.field("iid").unwrap(), 7);
//! assert_eq!(*issue.path("labels.0.name").unwrap(), "bug");
//! assert!(issue.field("idd").is_err());
//! ```

mod types;

pub use types::{wrap, WrappedObject, WrappedValue};
