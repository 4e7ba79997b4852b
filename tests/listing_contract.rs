//! End-to-end checks of the query contract: the client's canonical query
//! string, the endpoint's parameter parsing, and the pure filter/order/page
//! semantics those two halves agree on, evaluated over in-memory rows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tracker_api::params::RawListingParams;
use tracker_client::to_query_string;
use tracker_core::time::to_utc8_minute_text;
use tracker_core::{
    AccountRecord, EligibilityGate, EnrichmentProfile, ListingQuery, SortOrder,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 22, 12, 0, 0).unwrap()
}

fn row(
    handle: &str,
    followers: Option<i64>,
    category: Option<&str>,
    hours_ago: i64,
    enriched: bool,
) -> AccountRecord {
    let registered_at = now() - Duration::hours(hours_ago);
    AccountRecord {
        registered_at,
        registered_at_utc8: to_utc8_minute_text(registered_at),
        username: Some(handle.to_uppercase()),
        handle: handle.to_string(),
        followers_count: followers,
        bio: None,
        category: category.map(str::to_string),
        wallet_address: None,
        enrichment: enriched.then(|| EnrichmentProfile {
            grok_summary: Some("summary".to_string()),
            grok_checked_at: Some(now() - Duration::hours(1)),
            ..Default::default()
        }),
    }
}

/// Reference evaluation of a listing request: filter, order, count, page.
fn evaluate(
    rows: &[AccountRecord],
    query: &ListingQuery,
    gate: &EligibilityGate,
) -> (Vec<AccountRecord>, i64) {
    let mut matching: Vec<AccountRecord> = rows
        .iter()
        .filter(|r| gate.admits_at(r, now()) && query.matches(r))
        .cloned()
        .collect();
    matching.sort_by(|a, b| query.sort.ordering(a, b));
    let total = matching.len() as i64;
    let items: Vec<AccountRecord> = matching
        .into_iter()
        .skip(query.offset() as usize)
        .take(query.page_size as usize)
        .collect();
    (items, total)
}

fn parse(query_string: &str) -> ListingQuery {
    let raw: RawListingParams = serde_urlencoded::from_str(query_string).unwrap();
    raw.into_query()
}

#[test]
fn request_with_no_parameters_uses_defaults_and_gates() {
    let rows = vec![
        row("eligible_new", Some(9000), Some("AI"), 2, true),
        row("eligible_older", Some(8000), Some("Crypto"), 70, true),
        row("at_floor", Some(5000), Some("AI"), 2, true),
        row("unclassified", Some(9000), Some("/"), 2, true),
        row("uncategorized", Some(9000), None, 2, true),
        row("unenriched", Some(9000), Some("AI"), 2, false),
        row("too_old", Some(9000), Some("AI"), 73, true),
        row("unknown_followers", None, Some("AI"), 2, true),
    ];

    let query = parse("");
    assert_eq!(query.page, 1);
    assert_eq!(query.page_size, 20);
    assert_eq!(query.sort, SortOrder::FollowersDesc);

    let (items, total) = evaluate(&rows, &query, &EligibilityGate::featured());
    let handles: Vec<&str> = items.iter().map(|r| r.handle.as_str()).collect();
    assert_eq!(handles, vec!["eligible_new", "eligible_older"]);
    assert_eq!(total, 2);
}

#[test]
fn strict_follower_boundary_at_5000() {
    let rows = vec![
        row("at_5000", Some(5000), Some("AI"), 2, true),
        row("at_5001", Some(5001), Some("AI"), 2, true),
    ];
    let (items, total) = evaluate(&rows, &parse(""), &EligibilityGate::featured());
    assert_eq!(total, 1);
    assert_eq!(items[0].handle, "at_5001");
}

#[test]
fn second_page_of_a_filtered_set_returns_ranks_11_to_20() {
    // 25 eligible rows with strictly decreasing follower counts.
    let rows: Vec<AccountRecord> = (0..25)
        .map(|i| {
            row(
                &format!("acct{i:02}"),
                Some(10_000 - i as i64 * 10),
                Some("AI"),
                2,
                true,
            )
        })
        .collect();

    let query = parse("page=2&pageSize=10");
    assert_eq!(query.page, 2);
    assert_eq!(query.page_size, 10);

    let (items, total) = evaluate(&rows, &query, &EligibilityGate::featured());
    assert_eq!(total, 25);
    assert_eq!(items.len(), 10);
    let handles: Vec<&str> = items.iter().map(|r| r.handle.as_str()).collect();
    let expected: Vec<String> = (10..20).map(|i| format!("acct{i:02}")).collect();
    assert_eq!(handles, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn category_filter_is_a_contains_disjunction() {
    let rows = vec![
        row("web3", Some(9000), Some("Web3/Crypto"), 2, true),
        row("ai", Some(8000), Some("ai"), 2, true),
        row("artist", Some(7000), Some("Artist"), 2, true),
    ];
    let query = parse("categories=AI,Crypto");
    let (items, total) = evaluate(&rows, &query, &EligibilityGate::featured());
    assert_eq!(total, 2);
    let handles: Vec<&str> = items.iter().map(|r| r.handle.as_str()).collect();
    assert_eq!(handles, vec!["web3", "ai"]);
}

#[test]
fn unparseable_follower_bound_filters_nothing() {
    let rows = vec![
        row("small", Some(5500), Some("AI"), 2, true),
        row("large", Some(90_000), Some("AI"), 2, true),
    ];
    let (_, total_bogus) = evaluate(
        &rows,
        &parse("minFollowers=abc"),
        &EligibilityGate::featured(),
    );
    let (_, total_real) = evaluate(
        &rows,
        &parse("minFollowers=10000"),
        &EligibilityGate::featured(),
    );
    assert_eq!(total_bogus, 2);
    assert_eq!(total_real, 1);
}

#[test]
fn sort_tokens_order_the_page() {
    let rows = vec![
        row("mid", Some(7000), Some("AI"), 10, true),
        row("top", Some(9000), Some("AI"), 30, true),
        row("low", Some(6000), Some("AI"), 20, true),
    ];

    let (items, _) = evaluate(&rows, &parse("sort=followers_desc"), &EligibilityGate::featured());
    let followers: Vec<i64> = items.iter().filter_map(|r| r.followers_count).collect();
    assert!(followers.windows(2).all(|w| w[0] >= w[1]));

    let (items, _) = evaluate(&rows, &parse("sort=registered_asc"), &EligibilityGate::featured());
    assert!(items
        .windows(2)
        .all(|w| w[0].registered_at <= w[1].registered_at));
}

#[test]
fn committed_filters_round_trip_through_the_wire_form() {
    let committed = ListingQuery {
        page: 2,
        page_size: 10,
        start: Some("2026-08-20 07:30".to_string()),
        end: Some("2026-08-22 00:00".to_string()),
        min_followers: Some(6000),
        max_followers: Some(50_000),
        categories: vec!["AI".to_string(), "TradFi".to_string()],
        sort: SortOrder::RegisteredDesc,
    };
    let parsed = parse(&to_query_string(&committed, true));
    assert_eq!(parsed, committed);
}

#[test]
fn time_bounds_apply_on_the_display_field() {
    let rows = vec![
        row("early", Some(9000), Some("AI"), 40, true),
        row("late", Some(8000), Some("AI"), 2, true),
    ];
    let cutoff = to_utc8_minute_text(now() - Duration::hours(20));
    let qs = format!("start={}", cutoff.replace(' ', "T"));
    let (items, total) = evaluate(&rows, &parse(&qs), &EligibilityGate::featured());
    assert_eq!(total, 1);
    assert_eq!(items[0].handle, "late");
}
