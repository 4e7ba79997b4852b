//! The canonical listing query.
//!
//! `ListingQuery` is the validated, clamped form both halves of the system
//! agree on: the client serializes it into a query string, the HTTP layer
//! parses raw parameters back into it, and the store layer translates it
//! into SQL. `matches_at` and `SortOrder::ordering` are the pure statement
//! of that contract; the SQL translation must agree with them.

use std::cmp::Ordering;

use crate::account::AccountRecord;

/// Default page size when the caller sends none.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper clamp for caller-requested page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Rolling registration window applied by the eligibility gates.
pub const RECENT_WINDOW_HOURS: i64 = 72;

/// Orderings accepted by the featured listing. The discover listing always
/// uses the default. Wire form goes through `as_token`/`parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Followers descending, then registration time descending.
    #[default]
    FollowersDesc,
    RegisteredDesc,
    RegisteredAsc,
}

impl SortOrder {
    /// The wire token for this ordering.
    pub fn as_token(&self) -> &'static str {
        match self {
            SortOrder::FollowersDesc => "followers_desc",
            SortOrder::RegisteredDesc => "registered_desc",
            SortOrder::RegisteredAsc => "registered_asc",
        }
    }

    /// Parse a wire token; unknown tokens are rejected (callers fall back
    /// to the default).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "followers_desc" => Some(SortOrder::FollowersDesc),
            "registered_desc" => Some(SortOrder::RegisteredDesc),
            "registered_asc" => Some(SortOrder::RegisteredAsc),
            _ => None,
        }
    }

    /// Comparator form of the ordering. Unknown follower counts sort last
    /// under `FollowersDesc`, matching the SQL `NULLS LAST`.
    pub fn ordering(&self, a: &AccountRecord, b: &AccountRecord) -> Ordering {
        match self {
            SortOrder::FollowersDesc => {
                let fa = a.followers_count.unwrap_or(i64::MIN);
                let fb = b.followers_count.unwrap_or(i64::MIN);
                fb.cmp(&fa).then(b.registered_at.cmp(&a.registered_at))
            }
            SortOrder::RegisteredDesc => b.registered_at.cmp(&a.registered_at),
            SortOrder::RegisteredAsc => a.registered_at.cmp(&b.registered_at),
        }
    }
}

/// Floor a caller-requested page at 1.
pub fn clamp_page(raw: i64) -> u32 {
    raw.max(1).min(i64::from(u32::MAX)) as u32
}

/// Clamp a caller-requested page size into `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(raw: i64) -> u32 {
    raw.clamp(1, i64::from(MAX_PAGE_SIZE)) as u32
}

/// Lenient follower-bound parsing: the bound applies only if the text is a
/// finite number; anything else is ignored rather than rejected.
pub fn parse_follower_bound(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let value = raw.parse::<f64>().ok()?;
    value.is_finite().then_some(value as i64)
}

/// Category matching policy: a record matches a requested token list when
/// its category case-insensitively contains any token (OR across tokens).
/// Records without a category never match a non-empty list.
pub fn category_matches(category: Option<&str>, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let Some(category) = category else {
        return false;
    };
    let category = category.to_lowercase();
    tokens
        .iter()
        .any(|token| category.contains(&token.to_lowercase()))
}

/// Validated, clamped listing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    /// 1-based page, always >= 1.
    pub page: u32,
    /// Rows per page, always in `[1, MAX_PAGE_SIZE]`.
    pub page_size: u32,
    /// Inclusive lower bound on `registered_at_utc8`, minute text.
    pub start: Option<String>,
    /// Inclusive upper bound on `registered_at_utc8`, minute text.
    pub end: Option<String>,
    /// Inclusive lower bound on followers.
    pub min_followers: Option<i64>,
    /// Inclusive upper bound on followers.
    pub max_followers: Option<i64>,
    /// Category tokens, matched per `category_matches`.
    pub categories: Vec<String>,
    pub sort: SortOrder,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            start: None,
            end: None,
            min_followers: None,
            max_followers: None,
            categories: Vec::new(),
            sort: SortOrder::default(),
        }
    }
}

impl ListingQuery {
    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// True when the record passes every caller-supplied filter. The
    /// eligibility gate is applied separately.
    pub fn matches(&self, record: &AccountRecord) -> bool {
        if let Some(start) = &self.start {
            if record.registered_at_utc8.as_str() < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if record.registered_at_utc8.as_str() > end.as_str() {
                return false;
            }
        }
        if let Some(min) = self.min_followers {
            if !record.followers_count.is_some_and(|f| f >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_followers {
            if !record.followers_count.is_some_and(|f| f <= max) {
                return false;
            }
        }
        category_matches(record.category.as_deref(), &self.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(handle: &str, followers: Option<i64>, category: Option<&str>) -> AccountRecord {
        AccountRecord {
            registered_at: Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap(),
            registered_at_utc8: "2026-08-20 20:00".to_string(),
            username: None,
            handle: handle.to_string(),
            followers_count: followers,
            bio: None,
            category: category.map(str::to_string),
            wallet_address: None,
            enrichment: None,
        }
    }

    #[test]
    fn clamps_page_and_page_size() {
        assert_eq!(clamp_page(0), 1);
        assert_eq!(clamp_page(-5), 1);
        assert_eq!(clamp_page(3), 3);
        assert_eq!(clamp_page_size(0), 1);
        assert_eq!(clamp_page_size(-1), 1);
        assert_eq!(clamp_page_size(250), 100);
        assert_eq!(clamp_page_size(20), 20);
    }

    #[test]
    fn category_match_is_case_insensitive_contains() {
        let tokens = vec!["AI".to_string(), "Crypto".to_string()];
        assert!(category_matches(Some("Web3/Crypto"), &tokens));
        assert!(category_matches(Some("ai"), &tokens));
        assert!(!category_matches(Some("Artist"), &tokens));
        assert!(!category_matches(None, &tokens));
        assert!(category_matches(None, &[]));
    }

    #[test]
    fn unknown_sort_tokens_are_rejected() {
        assert_eq!(SortOrder::parse("registered_asc"), Some(SortOrder::RegisteredAsc));
        assert_eq!(SortOrder::parse("newest"), None);
        assert_eq!(SortOrder::default().as_token(), "followers_desc");
    }

    #[test]
    fn default_ordering_breaks_follower_ties_by_registration() {
        let mut a = record("a", Some(7000), None);
        let mut b = record("b", Some(7000), None);
        a.registered_at = Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap();
        b.registered_at = Utc.with_ymd_and_hms(2026, 8, 20, 11, 0, 0).unwrap();
        // Same followers: the later registration comes first.
        assert_eq!(
            SortOrder::FollowersDesc.ordering(&b, &a),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn follower_bounds_exclude_unknown_counts() {
        let mut query = ListingQuery::default();
        query.min_followers = Some(100);
        assert!(!query.matches(&record("x", None, Some("AI"))));
        assert!(query.matches(&record("y", Some(100), Some("AI"))));
    }

    #[test]
    fn time_bounds_are_inclusive_minute_text() {
        let mut query = ListingQuery::default();
        query.start = Some("2026-08-20 20:00".to_string());
        query.end = Some("2026-08-20 20:00".to_string());
        assert!(query.matches(&record("x", Some(1), None)));
        query.end = Some("2026-08-20 19:59".to_string());
        assert!(!query.matches(&record("x", Some(1), None)));
    }

    #[test]
    fn offset_is_zero_based_page_math() {
        let query = ListingQuery {
            page: 2,
            page_size: 10,
            ..Default::default()
        };
        assert_eq!(query.offset(), 10);
    }
}
