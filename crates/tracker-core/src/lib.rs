pub mod account;
pub mod gate;
pub mod query;
pub mod time;

pub use account::{AccountRecord, EnrichmentProfile, PageEnvelope, UNCLASSIFIED_CATEGORY};
pub use gate::EligibilityGate;
pub use query::{
    category_matches, clamp_page, clamp_page_size, parse_follower_bound, ListingQuery, SortOrder,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, RECENT_WINDOW_HOURS,
};
