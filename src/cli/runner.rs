//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FieldFilter, OutputFormat};
use crate::client::Client;
use crate::config::{ClientConfig, ENV_ENDPOINT};
use crate::error::{Error, Result, ResultExt};
use crate::http::RequestOptions;
use crate::pagination::{ApiResponse, FetchOptions};
use crate::types::JsonValue;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Get {
                path,
                query,
                per_page,
                limit,
                fields,
            } => {
                let mut options = build_options(query, None)?;
                if let Some(per_page) = per_page {
                    options = options.per_page(*per_page);
                }
                self.get(path, options, *limit, fields).await
            }
            Commands::Post {
                path,
                query,
                data,
                fields,
            } => {
                let options = build_options(query, data.as_deref())?;
                let response = self.client()?.post(path, options).await?;
                self.print(&response, fields)
            }
            Commands::Put {
                path,
                query,
                data,
                fields,
            } => {
                let options = build_options(query, data.as_deref())?;
                let response = self.client()?.put(path, options).await?;
                self.print(&response, fields)
            }
            Commands::Delete { path, query } => {
                let options = build_options(query, None)?;
                let response = self.client()?.delete(path, options).await?;
                self.print(&response, &FieldFilter::default())
            }
            Commands::Config => {
                let config = self.client_config()?;
                self.emit(&config.redacted())
            }
        }
    }

    /// Resolve configuration: file, then environment, then flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("Config file {}", path.display()))?,
            None => {
                let endpoint = self.cli.endpoint.clone().ok_or_else(|| {
                    Error::config("GitLab endpoint not specified (use --endpoint or GITLAB_API_ENDPOINT)")
                })?;
                ClientConfig::from_lookup(|key| {
                    if key == ENV_ENDPOINT {
                        Some(endpoint.clone())
                    } else {
                        std::env::var(key).ok()
                    }
                })?
            }
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(token) = &self.cli.token {
            config.private_token = Some(token.clone());
        }
        if self.cli.no_auto_paginate {
            config.auto_paginate = false;
        }

        config.validate()?;
        Ok(config)
    }

    fn client(&self) -> Result<Client> {
        Client::new(self.client_config()?)
    }

    async fn get(
        &self,
        path: &str,
        options: RequestOptions,
        limit: Option<usize>,
        fields: &FieldFilter,
    ) -> Result<()> {
        let client = self.client()?;
        let fetch = FetchOptions {
            auto_paginate: client.config().auto_paginate,
            limit,
            max_pages: None,
        };

        let response = client.get_with(path, options, fetch).await?;
        if let ApiResponse::Collection(result) = &response {
            info!(
                "Fetched {} items in {} pages (total: {})",
                result.len(),
                result.pages_fetched(),
                result
                    .total()
                    .map_or_else(|| "unknown".to_string(), |t| t.to_string())
            );
        }
        self.print(&response, fields)
    }

    fn print(&self, response: &ApiResponse, fields: &FieldFilter) -> Result<()> {
        let value = filter_fields(response.to_raw(), fields);
        self.emit(&value)
    }

    fn emit(&self, value: &JsonValue) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Turn CLI query pairs and body text into request options
pub fn build_options(query: &[(String, String)], data: Option<&str>) -> Result<RequestOptions> {
    let mut options = RequestOptions::new();
    for (key, value) in query {
        options = options.query(key.as_str(), value);
    }
    if let Some(data) = data {
        let body: JsonValue = serde_json::from_str(data)?;
        options = options.json(body);
    }
    Ok(options)
}

/// Apply `--only` / `--except` to every object in the output
pub fn filter_fields(value: JsonValue, fields: &FieldFilter) -> JsonValue {
    if fields.only.is_empty() && fields.except.is_empty() {
        return value;
    }

    match value {
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(|v| filter_fields(v, fields)).collect())
        }
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .filter(|(key, _)| {
                    (fields.only.is_empty() || fields.only.contains(key))
                        && !fields.except.contains(key)
                })
                .collect(),
        ),
        other => other,
    }
}
