//! Draft and committed filter state for one listing view.
//!
//! Draft edits are bound to input controls and never trigger a request;
//! `apply` commits them and resets to the first page. Category toggles are
//! the accepted exception: they commit immediately.

use crate::query_string::to_query_string;
use tracker_core::time::normalize_minute_text;
use tracker_core::{parse_follower_bound, ListingQuery, SortOrder};

/// Filter inputs as typed by the operator. Raw strings, exactly as the
/// controls hold them; validation happens on commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub start: String,
    pub end: String,
    pub min_followers: String,
    pub max_followers: String,
}

#[derive(Debug, Clone)]
pub struct FilterState {
    pub draft: FilterDraft,
    committed: ListingQuery,
    auto_refresh: bool,
    include_sort: bool,
}

impl FilterState {
    /// State for the discover view (no sort token on the wire).
    pub fn discover() -> Self {
        Self {
            draft: FilterDraft::default(),
            committed: ListingQuery::default(),
            auto_refresh: false,
            include_sort: false,
        }
    }

    /// State for the featured view (sort token always on the wire).
    pub fn featured() -> Self {
        Self {
            include_sort: true,
            ..Self::discover()
        }
    }

    /// The filter values currently driving requests.
    pub fn committed(&self) -> &ListingQuery {
        &self.committed
    }

    /// Commit the draft and reset to the first page. Time bounds are
    /// normalized to minute text; follower bounds that do not parse are
    /// dropped, matching the endpoint's leniency.
    pub fn apply(&mut self) {
        self.committed.start = non_empty(normalize_minute_text(&self.draft.start));
        self.committed.end = non_empty(normalize_minute_text(&self.draft.end));
        self.committed.min_followers = parse_follower_bound(&self.draft.min_followers);
        self.committed.max_followers = parse_follower_bound(&self.draft.max_followers);
        self.committed.page = 1;
    }

    /// Toggle one category. Commits immediately (the toggle doubles as the
    /// page-reset trigger), unlike the staged filters.
    pub fn toggle_category(&mut self, value: &str) {
        if let Some(pos) = self.committed.categories.iter().position(|c| c == value) {
            self.committed.categories.remove(pos);
        } else {
            self.committed.categories.push(value.to_string());
        }
        self.committed.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.committed.page = page.max(1);
    }

    /// Featured only. Resets to the first page.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.committed.sort = sort;
        self.committed.page = 1;
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn set_auto_refresh(&mut self, on: bool) {
        self.auto_refresh = on;
    }

    /// Canonical string for the committed query.
    pub fn query_string(&self) -> String {
        to_query_string(&self.committed, self.include_sort)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_edits_do_not_touch_the_committed_query() {
        let mut state = FilterState::discover();
        state.set_page(4);
        state.draft.min_followers = "100".to_string();
        state.draft.start = "2026-08-20T07:30".to_string();

        assert_eq!(state.committed().min_followers, None);
        assert_eq!(state.committed().start, None);
        assert_eq!(state.committed().page, 4);
    }

    #[test]
    fn apply_commits_the_draft_and_resets_the_page() {
        let mut state = FilterState::discover();
        state.set_page(4);
        state.draft.start = "2026-08-20T07:30".to_string();
        state.draft.min_followers = "100".to_string();
        state.draft.max_followers = "abc".to_string();
        state.apply();

        let committed = state.committed();
        assert_eq!(committed.page, 1);
        assert_eq!(committed.start.as_deref(), Some("2026-08-20 07:30"));
        assert_eq!(committed.min_followers, Some(100));
        assert_eq!(committed.max_followers, None);
    }

    #[test]
    fn category_toggles_commit_immediately() {
        let mut state = FilterState::discover();
        state.set_page(3);
        state.toggle_category("AI");
        assert_eq!(state.committed().categories, vec!["AI".to_string()]);
        assert_eq!(state.committed().page, 1);

        state.toggle_category("AI");
        assert!(state.committed().categories.is_empty());
    }

    #[test]
    fn sort_changes_reset_the_page() {
        let mut state = FilterState::featured();
        state.set_page(2);
        state.set_sort(SortOrder::RegisteredAsc);
        assert_eq!(state.committed().page, 1);
        assert!(state.query_string().contains("sort=registered_asc"));
    }

    #[test]
    fn query_string_changes_only_when_committed_state_changes() {
        let mut state = FilterState::discover();
        let before = state.query_string();
        state.draft.min_followers = "500".to_string();
        assert_eq!(state.query_string(), before);
        state.apply();
        assert_ne!(state.query_string(), before);
    }
}
