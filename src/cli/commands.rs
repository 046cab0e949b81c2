//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the GitLab REST API
#[derive(Parser, Debug)]
#[command(name = "gitlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API endpoint, e.g. https://gitlab.example.com/api/v4
    #[arg(long, global = true, env = "GITLAB_API_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Private token sent as PRIVATE-TOKEN
    #[arg(long, global = true, env = "GITLAB_API_PRIVATE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only fetch the first page of GET results
    #[arg(long, global = true)]
    pub no_auto_paginate: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// GET a path, following pagination links
    Get {
        /// API path, e.g. /projects/1/issues
        path: String,

        /// Query parameter (repeatable)
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// Items per page
        #[arg(long)]
        per_page: Option<u32>,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        fields: FieldFilter,
    },

    /// POST to a path
    Post {
        path: String,

        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,

        #[command(flatten)]
        fields: FieldFilter,
    },

    /// PUT to a path
    Put {
        path: String,

        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,

        #[command(flatten)]
        fields: FieldFilter,
    },

    /// DELETE a path
    Delete {
        path: String,

        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },

    /// Show the effective configuration (token masked)
    Config,
}

/// Restrict which top-level keys of each object are printed
#[derive(Args, Debug, Clone, Default)]
pub struct FieldFilter {
    /// Only print these keys (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "except")]
    pub only: Vec<String>,

    /// Print all keys but these (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse `key=value`
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
