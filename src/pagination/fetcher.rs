//! The pagination loop
//!
//! Page N+1's URL is only known once page N's `Link` header is parsed, so
//! pages are requested strictly one after another. Every call starts with
//! an empty accumulator; the first error ends the call and the pages
//! gathered so far are dropped with it.

use super::types::{ApiResponse, FetchOptions, Page, PaginatedResult};
use crate::error::Result;
use crate::http::{RequestOptions, Transport};
use crate::types::Method;
use futures::stream::{self, Stream};
use tracing::{debug, warn};

/// Drives GET requests across `Link`-header pages
pub struct PaginatingFetcher<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PaginatingFetcher<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetch one page
    pub async fn fetch_page(&self, path: &str, options: &RequestOptions) -> Result<Page> {
        let response = self.transport.send(Method::GET, path, options).await?;
        Ok(Page::from_response(response))
    }

    /// Fetch `path`, following `next` links as `fetch` allows
    pub async fn fetch(
        &self,
        path: &str,
        options: RequestOptions,
        fetch: FetchOptions,
    ) -> Result<ApiResponse> {
        let (result, first_page_is_list) = self.collect(path, options, fetch).await?;
        Ok(ApiResponse::assemble(first_page_is_list, result))
    }

    /// Like `fetch`, but always returns the items as a collection
    pub async fn fetch_all(
        &self,
        path: &str,
        options: RequestOptions,
        fetch: FetchOptions,
    ) -> Result<PaginatedResult> {
        let (result, _) = self.collect(path, options, fetch).await?;
        Ok(result)
    }

    /// Fetch the page after the last one in `result`
    pub async fn next_page(&self, result: &PaginatedResult) -> Result<Option<PaginatedResult>> {
        let Some(url) = result.next_page_url() else {
            return Ok(None);
        };
        let next = self
            .fetch_all(url, RequestOptions::new(), FetchOptions::single_page())
            .await?;
        Ok(Some(next))
    }

    async fn collect(
        &self,
        path: &str,
        options: RequestOptions,
        fetch: FetchOptions,
    ) -> Result<(PaginatedResult, bool)> {
        if fetch.limit == Some(0) {
            debug!("Limit 0 for {path}, nothing to fetch");
            return Ok((PaginatedResult::default(), true));
        }

        let mut items = Vec::new();
        let mut current_path = path.to_string();
        let mut current_options = options;
        let mut first_page_is_list = false;
        let mut pages_fetched = 0;
        let mut total = None;

        loop {
            let page = self.fetch_page(&current_path, &current_options).await?;
            pages_fetched += 1;
            if pages_fetched == 1 {
                first_page_is_list = page.is_list;
            }

            debug!(
                page = pages_fetched,
                items = page.items.len(),
                has_next = page.has_next_page(),
                "Fetched page of {path}"
            );

            let Page {
                items: page_items,
                links,
                total: page_total,
                meta,
                ..
            } = page;

            items.extend(page_items);
            total = page_total.or(total);

            let finish = |items: Vec<_>| {
                PaginatedResult::new(items, total, links.clone(), meta, pages_fetched)
            };

            if let Some(limit) = fetch.limit {
                if items.len() >= limit {
                    if items.len() > limit {
                        debug!("Truncating {} items to limit {limit}", items.len());
                    }
                    items.truncate(limit);
                    return Ok((finish(items), first_page_is_list));
                }
            }

            if !fetch.auto_paginate {
                return Ok((finish(items), first_page_is_list));
            }

            if fetch.max_pages.is_some_and(|max| pages_fetched >= max) {
                if links.next.is_some() {
                    warn!("Stopped {path} after {pages_fetched} pages with more remaining");
                }
                return Ok((finish(items), first_page_is_list));
            }

            match links.next {
                Some(ref next) => {
                    current_path = next.clone();
                    current_options = current_options.without_query();
                }
                None => return Ok((finish(items), first_page_is_list)),
            }
        }
    }

    /// Lazily fetch pages one at a time
    ///
    /// The stream yields each page as it arrives, ends after the page with
    /// no `next` link, and ends right after yielding the first error.
    pub fn pages(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> impl Stream<Item = Result<Page>> + 'a {
        let transport = self.transport;
        let start = Some((path.to_string(), options));

        stream::unfold(start, move |state| async move {
            let Some((path, options)) = state else {
                return None;
            };
            match transport.send(Method::GET, &path, &options).await {
                Ok(response) => {
                    let page = Page::from_response(response);
                    let next = page
                        .links
                        .next
                        .clone()
                        .map(|url| (url, options.without_query()));
                    Some((Ok(page), next))
                }
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
