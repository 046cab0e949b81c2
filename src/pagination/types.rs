//! Pagination types
//!
//! A `Page` is one response; a `PaginatedResult` is the pages of one
//! logical call concatenated; an `ApiResponse` is what request helpers
//! hand back: a single object or a collection.

use super::links::{parse_page_meta, total_from_headers, PageLinkSet, PageMeta};
use crate::http::RawResponse;
use crate::types::JsonValue;
use crate::wrap::WrappedValue;
use std::ops::Index;

/// Behavior of one paginated fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Follow `rel="next"` links until exhausted
    pub auto_paginate: bool,
    /// Stop once this many items are collected (extra items are dropped)
    pub limit: Option<usize>,
    /// Stop after this many pages
    pub max_pages: Option<usize>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            auto_paginate: true,
            limit: None,
            max_pages: None,
        }
    }
}

impl FetchOptions {
    /// Fetch only the first page
    pub fn single_page() -> Self {
        Self {
            auto_paginate: false,
            ..Self::default()
        }
    }

    /// Follow pages until `limit` items are collected
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn auto_paginate(mut self, enabled: bool) -> Self {
        self.auto_paginate = enabled;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }
}

// ============================================================================
// Page
// ============================================================================

/// One fetched page, wrapped
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Array elements, or the whole body as one item when it is not an array
    pub items: Vec<WrappedValue>,
    /// Whether the body was a JSON array
    pub is_list: bool,
    pub links: PageLinkSet,
    pub total: Option<u64>,
    pub meta: PageMeta,
}

impl Page {
    /// Wrap a response body and parse its pagination headers
    pub fn from_response(response: RawResponse) -> Self {
        let links = PageLinkSet::from_headers(&response.headers);
        let total = total_from_headers(&response.headers);
        let meta = parse_page_meta(&response.headers);
        let is_list = response.body.is_array();

        let items = match WrappedValue::from(response.body) {
            WrappedValue::Array(items) => items,
            other => vec![other],
        };

        Self {
            items,
            is_list,
            links,
            total,
            meta,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.links.next.is_some()
    }
}

// ============================================================================
// Paginated Result
// ============================================================================

/// Items of every page fetched by one logical call, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginatedResult {
    items: Vec<WrappedValue>,
    total: Option<u64>,
    links: PageLinkSet,
    meta: PageMeta,
    pages_fetched: usize,
}

impl PaginatedResult {
    pub fn new(
        items: Vec<WrappedValue>,
        total: Option<u64>,
        links: PageLinkSet,
        meta: PageMeta,
        pages_fetched: usize,
    ) -> Self {
        Self {
            items,
            total,
            links,
            meta,
            pages_fetched,
        }
    }

    pub fn items(&self) -> &[WrappedValue] {
        &self.items
    }

    pub fn into_items(self) -> Vec<WrappedValue> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WrappedValue> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&WrappedValue> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&WrappedValue> {
        self.items.get(index)
    }

    /// `X-Total` of the last page fetched, when GitLab sent it
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// `Link` relations of the last page fetched
    pub fn links(&self) -> &PageLinkSet {
        &self.links
    }

    /// Page counters of the last page fetched
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// More pages exist past what was fetched
    pub fn has_next_page(&self) -> bool {
        self.links.next.is_some()
    }

    pub fn next_page_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// The items as a JSON array
    pub fn to_raw(&self) -> JsonValue {
        JsonValue::Array(self.items.iter().map(WrappedValue::to_raw).collect())
    }
}

impl Index<usize> for PaginatedResult {
    type Output = WrappedValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl IntoIterator for PaginatedResult {
    type Item = WrappedValue;
    type IntoIter = std::vec::IntoIter<WrappedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a PaginatedResult {
    type Item = &'a WrappedValue;
    type IntoIter = std::slice::Iter<'a, WrappedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// Api Response
// ============================================================================

/// Result of a request helper
///
/// A JSON array body is always a `Collection`, even with zero or one
/// element. Any other body is `Single`, unless auto-pagination collected
/// more than one item from it.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Single(WrappedValue),
    Collection(PaginatedResult),
}

impl ApiResponse {
    /// Pick the shape for accumulated items
    pub fn assemble(first_page_is_list: bool, mut result: PaginatedResult) -> Self {
        if !first_page_is_list && result.items.len() == 1 {
            return Self::Single(result.items.remove(0));
        }
        Self::Collection(result)
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    pub fn as_single(&self) -> Option<&WrappedValue> {
        match self {
            Self::Single(value) => Some(value),
            Self::Collection(_) => None,
        }
    }

    pub fn as_collection(&self) -> Option<&PaginatedResult> {
        match self {
            Self::Collection(result) => Some(result),
            Self::Single(_) => None,
        }
    }

    pub fn into_single(self) -> Option<WrappedValue> {
        match self {
            Self::Single(value) => Some(value),
            Self::Collection(_) => None,
        }
    }

    pub fn into_collection(self) -> Option<PaginatedResult> {
        match self {
            Self::Collection(result) => Some(result),
            Self::Single(_) => None,
        }
    }

    /// The response as plain JSON (a collection becomes an array)
    pub fn to_raw(&self) -> JsonValue {
        match self {
            Self::Single(value) => value.to_raw(),
            Self::Collection(result) => result.to_raw(),
        }
    }
}
