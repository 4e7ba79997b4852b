use crate::models::{DbAccount, DbFeaturedAccount, BASE_COLUMNS, ENRICHMENT_COLUMNS};
use crate::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracker_core::{
    AccountRecord, EligibilityGate, ListingQuery, SortOrder, UNCLASSIFIED_CATEGORY,
};

const TABLE: &str = "molt_onboard";

pub struct AccountRepository;

impl AccountRepository {
    /// Fetch one discover page (base columns) plus the exact total of all
    /// matching rows.
    pub async fn list_discover(
        pool: &PgPool,
        query: &ListingQuery,
        gate: &EligibilityGate,
    ) -> Result<(Vec<AccountRecord>, i64)> {
        // One timestamp per request, so the count and the page see the same
        // registration floor.
        let now = Utc::now();
        let total = Self::count(pool, query, gate, now).await?;

        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {BASE_COLUMNS} FROM {TABLE}"));
        push_filters(&mut builder, query, gate, now);
        push_order_and_range(&mut builder, query);

        let rows: Vec<DbAccount> = builder.build_query_as().fetch_all(pool).await?;
        Ok((rows.into_iter().map(AccountRecord::from).collect(), total))
    }

    /// Fetch one featured page (base plus enrichment columns) plus the exact
    /// total of all matching rows.
    pub async fn list_featured(
        pool: &PgPool,
        query: &ListingQuery,
        gate: &EligibilityGate,
    ) -> Result<(Vec<AccountRecord>, i64)> {
        let now = Utc::now();
        let total = Self::count(pool, query, gate, now).await?;

        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {BASE_COLUMNS}, {ENRICHMENT_COLUMNS} FROM {TABLE}"
        ));
        push_filters(&mut builder, query, gate, now);
        push_order_and_range(&mut builder, query);

        let rows: Vec<DbFeaturedAccount> = builder.build_query_as().fetch_all(pool).await?;
        Ok((rows.into_iter().map(AccountRecord::from).collect(), total))
    }

    /// Exact count of all rows matching the filters, independent of paging.
    async fn count(
        pool: &PgPool,
        query: &ListingQuery,
        gate: &EligibilityGate,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {TABLE}"));
        push_filters(&mut builder, query, gate, now);

        let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;
        Ok(count)
    }
}

/// Translate the gate and the caller filters into WHERE clauses at one
/// point in time. Must agree with `EligibilityGate::admits_at` and
/// `ListingQuery::matches`.
fn push_filters(
    builder: &mut QueryBuilder<Postgres>,
    query: &ListingQuery,
    gate: &EligibilityGate,
    now: DateTime<Utc>,
) {
    builder.push(" WHERE TRUE");

    if let Some(min) = gate.min_followers_exclusive {
        builder.push(" AND followers_count > ").push_bind(min);
    }
    if gate.require_classified {
        builder
            .push(" AND category IS NOT NULL AND category <> ")
            .push_bind(UNCLASSIFIED_CATEGORY);
    }
    if gate.require_enriched {
        builder.push(" AND grok_checked_at IS NOT NULL");
    }
    if let Some(floor) = gate.registration_floor(now) {
        builder.push(" AND registered_at >= ").push_bind(floor);
    }

    if let Some(start) = &query.start {
        builder
            .push(" AND registered_at_utc8 >= ")
            .push_bind(start.clone());
    }
    if let Some(end) = &query.end {
        builder
            .push(" AND registered_at_utc8 <= ")
            .push_bind(end.clone());
    }
    if let Some(min) = query.min_followers {
        builder.push(" AND followers_count >= ").push_bind(min);
    }
    if let Some(max) = query.max_followers {
        builder.push(" AND followers_count <= ").push_bind(max);
    }

    if !query.categories.is_empty() {
        builder.push(" AND (");
        for (i, token) in query.categories.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push("category ILIKE ")
                .push_bind(format!("%{token}%"));
        }
        builder.push(")");
    }
}

fn push_order_and_range(builder: &mut QueryBuilder<Postgres>, query: &ListingQuery) {
    builder.push(match query.sort {
        SortOrder::FollowersDesc => {
            " ORDER BY followers_count DESC NULLS LAST, registered_at DESC"
        }
        SortOrder::RegisteredDesc => " ORDER BY registered_at DESC",
        SortOrder::RegisteredAsc => " ORDER BY registered_at ASC",
    });
    builder
        .push(" LIMIT ")
        .push_bind(i64::from(query.page_size));
    builder.push(" OFFSET ").push_bind(query.offset());
}
