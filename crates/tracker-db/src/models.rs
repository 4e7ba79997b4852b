use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::{AccountRecord, EnrichmentProfile};

/// Base columns of the `molt_onboard` table, in select order.
pub const BASE_COLUMNS: &str = "registered_at, registered_at_utc8, username, handle, \
     followers_count, bio, category, wallet_address";

/// Enrichment columns appended for the featured listing. These only exist
/// once the enrichment migration has been applied.
pub const ENRICHMENT_COLUMNS: &str = "grok_summary, grok_recent_focus, grok_experience, \
     grok_highlights, grok_crypto_attitude, grok_checked_at";

/// Database row for the discover listing (base columns only)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbAccount {
    pub registered_at: DateTime<Utc>,
    pub registered_at_utc8: String,
    pub username: Option<String>,
    pub handle: String,
    pub followers_count: Option<i64>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub wallet_address: Option<String>,
}

impl From<DbAccount> for AccountRecord {
    fn from(row: DbAccount) -> Self {
        AccountRecord {
            registered_at: row.registered_at,
            registered_at_utc8: row.registered_at_utc8,
            username: row.username,
            handle: row.handle,
            followers_count: row.followers_count,
            bio: row.bio,
            category: row.category,
            wallet_address: row.wallet_address,
            enrichment: None,
        }
    }
}

/// Database row for the featured listing (base plus enrichment columns)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbFeaturedAccount {
    pub registered_at: DateTime<Utc>,
    pub registered_at_utc8: String,
    pub username: Option<String>,
    pub handle: String,
    pub followers_count: Option<i64>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub wallet_address: Option<String>,
    pub grok_summary: Option<String>,
    pub grok_recent_focus: Option<Vec<String>>,
    pub grok_experience: Option<Vec<String>>,
    pub grok_highlights: Option<Vec<String>>,
    pub grok_crypto_attitude: Option<String>,
    pub grok_checked_at: Option<DateTime<Utc>>,
}

impl From<DbFeaturedAccount> for AccountRecord {
    fn from(row: DbFeaturedAccount) -> Self {
        AccountRecord {
            registered_at: row.registered_at,
            registered_at_utc8: row.registered_at_utc8,
            username: row.username,
            handle: row.handle,
            followers_count: row.followers_count,
            bio: row.bio,
            category: row.category,
            wallet_address: row.wallet_address,
            enrichment: Some(EnrichmentProfile {
                grok_summary: row.grok_summary,
                grok_recent_focus: row.grok_recent_focus,
                grok_experience: row.grok_experience,
                grok_highlights: row.grok_highlights,
                grok_crypto_attitude: row.grok_crypto_attitude,
                grok_checked_at: row.grok_checked_at,
            }),
        }
    }
}
