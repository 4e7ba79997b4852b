//! Canonical query-string form of a committed filter set.

use tracker_core::ListingQuery;

/// Serialize a committed query into its canonical string. Deterministic:
/// identical inputs produce byte-identical output, so callers reload only
/// when the string actually changes.
///
/// `page` and `pageSize` are always present; filters at their empty default
/// are omitted; categories are comma-joined into one value. The featured
/// view passes `include_sort` and always carries the sort token, default
/// included.
pub fn to_query_string(query: &ListingQuery, include_sort: bool) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(8);
    pairs.push(("page", query.page.to_string()));
    pairs.push(("pageSize", query.page_size.to_string()));
    if let Some(start) = &query.start {
        pairs.push(("start", start.clone()));
    }
    if let Some(end) = &query.end {
        pairs.push(("end", end.clone()));
    }
    if let Some(min) = query.min_followers {
        pairs.push(("minFollowers", min.to_string()));
    }
    if let Some(max) = query.max_followers {
        pairs.push(("maxFollowers", max.to_string()));
    }
    if !query.categories.is_empty() {
        pairs.push(("categories", query.categories.join(",")));
    }
    if include_sort {
        pairs.push(("sort", query.sort.as_token().to_string()));
    }
    serde_urlencoded::to_string(&pairs).expect("string pairs always serialize")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::SortOrder;

    #[test]
    fn defaults_serialize_to_page_and_size_only() {
        let query = ListingQuery::default();
        assert_eq!(to_query_string(&query, false), "page=1&pageSize=20");
    }

    #[test]
    fn featured_always_carries_the_sort_token() {
        let query = ListingQuery::default();
        assert_eq!(
            to_query_string(&query, true),
            "page=1&pageSize=20&sort=followers_desc"
        );
    }

    #[test]
    fn set_filters_appear_in_stable_order() {
        let query = ListingQuery {
            page: 2,
            page_size: 50,
            start: Some("2026-08-20 07:30".to_string()),
            end: None,
            min_followers: Some(100),
            max_followers: None,
            categories: vec!["AI".to_string(), "Crypto".to_string()],
            sort: SortOrder::RegisteredAsc,
        };
        assert_eq!(
            to_query_string(&query, true),
            "page=2&pageSize=50&start=2026-08-20+07%3A30&minFollowers=100&categories=AI%2CCrypto&sort=registered_asc"
        );
    }

    #[test]
    fn identical_inputs_yield_identical_strings() {
        let query = ListingQuery {
            categories: vec!["TradFi".to_string()],
            ..Default::default()
        };
        assert_eq!(
            to_query_string(&query, false),
            to_query_string(&query.clone(), false)
        );
    }
}
