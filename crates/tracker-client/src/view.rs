//! Render-side state for one listing view: the current page, loading and
//! error flags, and the single-selection disclosure state.

use chrono::{DateTime, Utc};

use crate::fetch::{FetchOutcome, TrackerClient};
use tracker_core::account::total_pages;
use tracker_core::{AccountRecord, DEFAULT_PAGE_SIZE};

/// Identity of one rendered row. Stable across re-renders of the same page,
/// distinct across pages with different data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub handle: String,
    pub registered_at: DateTime<Utc>,
}

impl RowKey {
    pub fn of(record: &AccountRecord) -> Self {
        Self {
            handle: record.handle.clone(),
            registered_at: record.registered_at,
        }
    }
}

/// What the table/card area should show. Loading is distinct from an empty
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Loading,
    Empty,
    Rows,
}

#[derive(Debug)]
pub struct ListingView {
    items: Vec<AccountRecord>,
    total: i64,
    page_size: u32,
    loading: bool,
    error: Option<String>,
    /// Discover: the one row with its wallet panel open.
    open_wallet: Option<RowKey>,
    /// Featured: the one expanded card.
    expanded_card: Option<RowKey>,
    applied_generation: u64,
}

impl Default for ListingView {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
            error: None,
            open_wallet: None,
            expanded_card: None,
            applied_generation: 0,
        }
    }
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[AccountRecord] {
        &self.items
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a fetch as started: shows the loading indicator and clears any
    /// prior error, but keeps the previous page visible.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch outcome. Only the most recently issued generation is
    /// accepted, and never one older than what is already applied; returns
    /// whether the outcome took effect. A failed fetch records its message
    /// and leaves the previous page in place.
    pub fn apply(&mut self, outcome: FetchOutcome, client: &TrackerClient) -> bool {
        if !client.is_current(outcome.generation) || outcome.generation <= self.applied_generation
        {
            return false;
        }
        self.applied_generation = outcome.generation;
        self.loading = false;

        match outcome.result {
            Ok(envelope) => {
                let changed = self.items.len() != envelope.items.len()
                    || self
                        .items
                        .iter()
                        .zip(&envelope.items)
                        .any(|(a, b)| RowKey::of(a) != RowKey::of(b));
                if changed {
                    self.open_wallet = None;
                    self.expanded_card = None;
                }
                self.items = envelope.items;
                self.total = envelope.total;
                self.page_size = envelope.page_size;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Toggle the wallet panel for one row; opening it closes any other.
    pub fn toggle_wallet(&mut self, key: RowKey) {
        if self.open_wallet.as_ref() == Some(&key) {
            self.open_wallet = None;
        } else {
            self.open_wallet = Some(key);
        }
    }

    /// Outside click.
    pub fn close_wallet(&mut self) {
        self.open_wallet = None;
    }

    pub fn open_wallet(&self) -> Option<&RowKey> {
        self.open_wallet.as_ref()
    }

    /// Toggle one card between collapsed and expanded; at most one card is
    /// expanded at a time.
    pub fn toggle_card(&mut self, key: RowKey) {
        if self.expanded_card.as_ref() == Some(&key) {
            self.expanded_card = None;
        } else {
            self.expanded_card = Some(key);
        }
    }

    pub fn expanded_card(&self) -> Option<&RowKey> {
        self.expanded_card.as_ref()
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.page_size)
    }

    pub fn has_prev(&self, page: u32) -> bool {
        page > 1
    }

    pub fn has_next(&self, page: u32) -> bool {
        page < self.total_pages()
    }

    pub fn status(&self) -> DisplayStatus {
        if !self.items.is_empty() {
            DisplayStatus::Rows
        } else if self.loading {
            DisplayStatus::Loading
        } else {
            DisplayStatus::Empty
        }
    }
}
