//! Raw query-string parameters and their validation.
//!
//! Everything arrives optional and string-typed; `into_query` clamps and
//! normalizes into the canonical `ListingQuery`. Malformed numeric bounds
//! are ignored rather than rejected.

use serde::Deserialize;
use tracker_core::time::normalize_minute_text;
use tracker_core::{
    clamp_page, clamp_page_size, parse_follower_bound, ListingQuery, SortOrder, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListingParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub min_followers: Option<String>,
    pub max_followers: Option<String>,
    pub categories: Option<String>,
    /// Featured listing only; the discover handler ignores it.
    pub sort: Option<String>,
}

impl RawListingParams {
    pub fn into_query(self) -> ListingQuery {
        let page = self
            .page
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(clamp_page)
            .unwrap_or(1);

        let page_size = self
            .page_size
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(clamp_page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let start = self
            .start
            .as_deref()
            .map(normalize_minute_text)
            .filter(|s| !s.is_empty());
        let end = self
            .end
            .as_deref()
            .map(normalize_minute_text)
            .filter(|s| !s.is_empty());

        let categories = self
            .categories
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let sort = self
            .sort
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default();

        ListingQuery {
            page,
            page_size,
            start,
            end,
            min_followers: self.min_followers.as_deref().and_then(parse_follower_bound),
            max_followers: self.max_followers.as_deref().and_then(parse_follower_bound),
            categories,
            sort,
        }
    }
}
