//! Headless client half of the tracker dashboard: draft/committed filter
//! state, the canonical query-string form, the fetch client with request
//! generations, the auto-refresh timer, and the listing view model. No
//! rendering lives here; a UI binds to these types.

pub mod fetch;
pub mod filter_state;
pub mod query_string;
pub mod refresh;
pub mod view;

pub use fetch::{ClientError, FetchOutcome, TrackerClient};
pub use filter_state::{FilterDraft, FilterState};
pub use query_string::to_query_string;
pub use refresh::{RefreshTask, REFRESH_INTERVAL};
pub use view::{DisplayStatus, ListingView, RowKey};
