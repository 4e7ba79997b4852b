//! Eligibility policy applied on top of caller filters.

use chrono::{DateTime, Duration, Utc};

use crate::account::{AccountRecord, UNCLASSIFIED_CATEGORY};
use crate::query::RECENT_WINDOW_HOURS;

/// The hard filters a listing applies before any caller filter. The hosted
/// dashboard hardcoded these inside its query routes; keeping them as a
/// named value lets the discover and featured listings share or relax the
/// policy independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityGate {
    /// Exclusive lower bound on follower count.
    pub min_followers_exclusive: Option<i64>,
    /// Exclude rows whose category is missing or the unclassified sentinel.
    pub require_classified: bool,
    /// Exclude rows whose enrichment has not completed.
    pub require_enriched: bool,
    /// Rolling registration floor in hours before now; callers cannot widen
    /// it.
    pub recent_window_hours: Option<i64>,
}

impl EligibilityGate {
    /// Gate for the featured listing: followers > 5000, classified,
    /// enriched, registered within the last 72 hours.
    pub fn featured() -> Self {
        Self {
            min_followers_exclusive: Some(5000),
            require_classified: true,
            require_enriched: true,
            recent_window_hours: Some(RECENT_WINDOW_HOURS),
        }
    }

    /// Gate for the discover listing. Currently identical to the featured
    /// gate, mirroring the upstream routes; if discover is ever meant to
    /// show all recent signups, widen it here rather than in the queries.
    pub fn discover() -> Self {
        Self::featured()
    }

    /// No eligibility restriction beyond the caller's own filters.
    pub fn open() -> Self {
        Self {
            min_followers_exclusive: None,
            require_classified: false,
            require_enriched: false,
            recent_window_hours: None,
        }
    }

    /// The registration-time floor implied by the rolling window at `now`.
    pub fn registration_floor(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.recent_window_hours.map(|hours| now - Duration::hours(hours))
    }

    /// Pure form of the gate; the SQL translation must agree with it.
    pub fn admits_at(&self, record: &AccountRecord, now: DateTime<Utc>) -> bool {
        if let Some(min) = self.min_followers_exclusive {
            if !record.followers_count.is_some_and(|f| f > min) {
                return false;
            }
        }
        if self.require_classified {
            let classified = record
                .category
                .as_deref()
                .is_some_and(|c| c != UNCLASSIFIED_CATEGORY);
            if !classified {
                return false;
            }
        }
        if self.require_enriched && !record.is_enriched() {
            return false;
        }
        if let Some(floor) = self.registration_floor(now) {
            if record.registered_at < floor {
                return false;
            }
        }
        true
    }
}
