//! Pagination header parsing
//!
//! GitLab describes pagination in response headers:
//! - `Link: <https://gitlab.example.com/api/v4/projects?page=2>; rel="next", ...`
//! - `X-Total`, `X-Total-Pages`, `X-Per-Page`, `X-Page`, `X-Next-Page`, `X-Prev-Page`
//!
//! Absent or malformed headers are the common case (GitLab omits `X-Total`
//! above 10,000 rows), so every parser here degrades to "absent" and never
//! fails.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::HeaderMap;
use serde::Serialize;
use tracing::trace;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// URLs for the well-known pagination relations of one response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinkSet {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinkSet {
    /// Parse the `Link` header of a response
    pub fn from_headers(headers: &HeaderMap) -> Self {
        parse_link_header(header_str(headers, "link"))
    }

    /// Look up a relation by name
    pub fn get(&self, rel: &str) -> Option<&str> {
        match rel {
            "first" => self.first.as_deref(),
            "prev" => self.prev.as_deref(),
            "next" => self.next.as_deref(),
            "last" => self.last.as_deref(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.prev.is_none() && self.next.is_none() && self.last.is_none()
    }
}

/// Parse a `Link` header value into a `PageLinkSet`
///
/// Values are separated by commas outside the angle brackets and look like
/// `<url>; rel="next"`. A value without a bracketed
/// URL or a `rel` is skipped; relations other than first/prev/next/last
/// are ignored.
pub fn parse_link_header(header: Option<&str>) -> PageLinkSet {
    let mut links = PageLinkSet::default();
    let Some(header) = header else {
        return links;
    };

    for part in split_link_values(header) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let url_and_params = part
            .strip_prefix('<')
            .and_then(|rest| rest.split_once('>'))
            .filter(|(url, _)| !url.is_empty());
        let (url, rel) = match url_and_params {
            Some((url, params)) => (Some(url), link_rel(params)),
            None => (None, None),
        };

        let (Some(url), Some(rel)) = (url, rel) else {
            trace!("Skipping malformed Link segment: {part}");
            continue;
        };

        let slot = match rel {
            "first" => &mut links.first,
            "prev" => &mut links.prev,
            "next" => &mut links.next,
            "last" => &mut links.last,
            other => {
                trace!("Ignoring Link relation '{other}'");
                continue;
            }
        };
        *slot = Some(url.to_string());
    }

    links
}

// `rel` among the `; key=value` parameters following the URL
fn link_rel(params: &str) -> Option<&str> {
    params.split(';').find_map(|param| {
        param
            .trim()
            .strip_prefix("rel=")
            .map(|rel| rel.trim_matches('"').trim_matches('\''))
    })
}

// Commas inside `<...>` belong to the URL (`?labels=bug,ui`), not the header list.
fn split_link_values(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_url = false;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' => in_url = true,
            '>' => in_url = false,
            ',' if !in_url => {
                parts.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&header[start..]);
    parts
}

/// Parse a count header such as `X-Total`
///
/// The value is trimmed; only an all-digit value that fits in a `u64`
/// yields a number.
pub fn parse_total_count(header: Option<&str>) -> Option<u64> {
    let value = header?.trim();
    if !DIGITS.is_match(value) {
        return None;
    }
    value.parse().ok()
}

/// Page counters GitLab sends next to the `Link` header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_pages: Option<u64>,
    pub per_page: Option<u64>,
    pub page: Option<u64>,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

/// Parse the `X-Total` header of a response
pub fn total_from_headers(headers: &HeaderMap) -> Option<u64> {
    parse_total_count(header_str(headers, "x-total"))
}

/// Parse the `X-*-Page` counters of a response
pub fn parse_page_meta(headers: &HeaderMap) -> PageMeta {
    PageMeta {
        total_pages: parse_total_count(header_str(headers, "x-total-pages")),
        per_page: parse_total_count(header_str(headers, "x-per-page")),
        page: parse_total_count(header_str(headers, "x-page")),
        next_page: parse_total_count(header_str(headers, "x-next-page")),
        prev_page: parse_total_count(header_str(headers, "x-prev-page")),
    }
}

// HeaderMap lookups are case-insensitive; non-ASCII values read as absent.
fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
