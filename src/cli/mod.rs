//! CLI module
//!
//! Command-line interface for issuing raw API requests.
//!
//! # Commands
//!
//! - `get` - GET a path, following pagination links
//! - `post` / `put` / `delete` - single requests with optional JSON body
//! - `config` - show the effective configuration

mod commands;
mod runner;

pub use commands::{parse_key_val, Cli, Commands, FieldFilter, OutputFormat};
pub use runner::{build_options, filter_fields, Runner};
