//! Request helpers shared by every endpoint

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions, Transport};
use crate::pagination::{ApiResponse, FetchOptions, Page, PaginatedResult, PaginatingFetcher};
use crate::types::Method;
use futures::Stream;
use std::sync::Arc;
use tracing::debug;

/// Client for one GitLab instance
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client that talks HTTP via reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpClient::new(&config)?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn fetcher(&self) -> PaginatingFetcher<'_> {
        PaginatingFetcher::new(self.transport.as_ref())
    }

    fn default_fetch(&self) -> FetchOptions {
        FetchOptions::default().auto_paginate(self.config.auto_paginate)
    }

    /// GET a path, following pages when auto-pagination is on
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.fetcher()
            .fetch(path, options, self.default_fetch())
            .await
    }

    /// GET with explicit pagination behavior
    pub async fn get_with(
        &self,
        path: &str,
        options: RequestOptions,
        fetch: FetchOptions,
    ) -> Result<ApiResponse> {
        self.fetcher().fetch(path, options, fetch).await
    }

    /// GET only the first page
    pub async fn get_page(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.get_with(path, options, FetchOptions::single_page())
            .await
    }

    /// GET every page as one collection, whatever the config says
    pub async fn get_all(&self, path: &str, options: RequestOptions) -> Result<PaginatedResult> {
        self.fetcher()
            .fetch_all(path, options, FetchOptions::default())
            .await
    }

    /// GET pages until `limit` items are collected
    pub async fn paginate_with_limit(
        &self,
        path: &str,
        options: RequestOptions,
        limit: usize,
    ) -> Result<PaginatedResult> {
        self.fetcher()
            .fetch_all(path, options, FetchOptions::with_limit(limit))
            .await
    }

    /// Stream pages one request at a time
    pub fn pages(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> impl Stream<Item = Result<Page>> + '_ {
        self.fetcher().pages(path, options)
    }

    /// Fetch the page following a result, if there is one
    pub async fn next_page(&self, result: &PaginatedResult) -> Result<Option<PaginatedResult>> {
        self.fetcher().next_page(result).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.single(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.single(Method::PUT, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.single(Method::DELETE, path, options).await
    }

    async fn single(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let response = self.transport.send(method, path, &options).await?;
        debug!("{method} {path} returned {}", response.status);
        let page = Page::from_response(response);
        let is_list = page.is_list;
        let result = PaginatedResult::new(page.items, page.total, page.links, page.meta, 1);
        Ok(ApiResponse::assemble(is_list, result))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Percent-encode one path segment (`group/project` → `group%2Fproject`)
pub fn url_encode(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
