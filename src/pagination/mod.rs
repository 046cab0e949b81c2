//! Pagination module
//!
//! Follows GitLab's `Link` header (`rel="first"|"prev"|"next"|"last"`) to
//! assemble multi-page collections into one logical result.
//!
//! # Overview
//!
//! - `links`: stateless parsers for `Link`, `X-Total` and the `X-*-Page`
//!   counters; malformed or absent headers read as "absent"
//! - `PaginatingFetcher`: the request loop, with an auto-pagination toggle,
//!   an item limit, and a lazy page stream
//! - `ApiResponse`: a single wrapped object or a `PaginatedResult`

mod fetcher;
mod links;
mod types;

pub use fetcher::PaginatingFetcher;
pub use links::{
    parse_link_header, parse_page_meta, parse_total_count, total_from_headers, PageLinkSet,
    PageMeta,
};
pub use types::{ApiResponse, FetchOptions, Page, PaginatedResult};
