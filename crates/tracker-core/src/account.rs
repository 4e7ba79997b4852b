use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category value the ingestion pipeline stores when it could not classify
/// an account.
pub const UNCLASSIFIED_CATEGORY: &str = "/";

/// Enrichment block produced by the external analysis pipeline.
///
/// All fields stay `None` until the pipeline has run for the account;
/// `grok_checked_at` being set marks completion. Absence means "not yet
/// analyzed", not "analyzed as empty".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnrichmentProfile {
    pub grok_summary: Option<String>,
    pub grok_recent_focus: Option<Vec<String>>,
    pub grok_experience: Option<Vec<String>>,
    pub grok_highlights: Option<Vec<String>>,
    pub grok_crypto_attitude: Option<String>,
    pub grok_checked_at: Option<DateTime<Utc>>,
}

/// One tracked account row from the `molt_onboard` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRecord {
    /// Registration instant (canonical timezone).
    pub registered_at: DateTime<Utc>,
    /// Precomputed UTC+8 display form, minute precision ("YYYY-MM-DD HH:MM").
    pub registered_at_utc8: String,
    pub username: Option<String>,
    /// Stable external identifier.
    pub handle: String,
    pub followers_count: Option<i64>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub wallet_address: Option<String>,
    /// Present on featured responses only; flattened so the wire keys keep
    /// their `grok_*` names.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentProfile>,
}

impl AccountRecord {
    /// True once the external analysis pipeline has run for this account.
    pub fn is_enriched(&self) -> bool {
        self.enrichment
            .as_ref()
            .is_some_and(|e| e.grok_checked_at.is_some())
    }
}

// Hand-written so a row carrying no grok_* keys parses to `enrichment:
// None`. A flattened `Option<EnrichmentProfile>` would yield an all-`None`
// profile instead, which reads as "analyzed as empty" and re-serializes
// with grok_* keys the wire form never had.
impl<'de> Deserialize<'de> for AccountRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            registered_at: DateTime<Utc>,
            registered_at_utc8: String,
            username: Option<String>,
            handle: String,
            followers_count: Option<i64>,
            bio: Option<String>,
            category: Option<String>,
            wallet_address: Option<String>,
            #[serde(flatten)]
            enrichment: EnrichmentProfile,
        }

        let wire = Wire::deserialize(deserializer)?;
        let enrichment = if wire.enrichment == EnrichmentProfile::default() {
            None
        } else {
            Some(wire.enrichment)
        };
        Ok(AccountRecord {
            registered_at: wire.registered_at,
            registered_at_utc8: wire.registered_at_utc8,
            username: wire.username,
            handle: wire.handle,
            followers_count: wire.followers_count,
            bio: wire.bio,
            category: wire.category,
            wallet_address: wire.wallet_address,
            enrichment,
        })
    }
}

/// One page of results plus the exact total of all matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub items: Vec<AccountRecord>,
    pub total: i64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl PageEnvelope {
    /// Page count implied by `total`, never less than 1.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }
}

/// max(1, ceil(total / page_size)).
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    let size = i64::from(page_size.max(1));
    let pages = (total.max(0) + size - 1) / size;
    (pages.max(1)) as u32
}
