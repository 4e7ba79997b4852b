//! Listing fetches with request generations.
//!
//! Filter changes can overlap in flight; each request is stamped with a
//! monotonically increasing generation, and only a response from the most
//! recently issued request may be applied. Superseded responses are dropped,
//! not cancelled.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::query_string::to_query_string;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use tracker_core::{ListingQuery, PageEnvelope};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),
}

/// Outcome of one listing fetch, stamped with its request generation.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<PageEnvelope, ClientError>,
}

/// HTTP client for the listing endpoints.
pub struct TrackerClient {
    http: reqwest::Client,
    base_url: String,
    generation: AtomicU64,
}

impl TrackerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            generation: AtomicU64::new(0),
        }
    }

    /// Stamp a new request. Later stamps supersede earlier ones.
    pub fn begin_request(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True when `generation` belongs to the most recently issued request;
    /// a stale response must not be applied to view state.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation.load(Ordering::SeqCst)
    }

    /// Fetch one discover page.
    pub async fn fetch_discover(&self, query: &ListingQuery) -> FetchOutcome {
        self.fetch("/api/records", to_query_string(query, false)).await
    }

    /// Fetch one featured page.
    pub async fn fetch_featured(&self, query: &ListingQuery) -> FetchOutcome {
        self.fetch("/api/featured", to_query_string(query, true)).await
    }

    async fn fetch(&self, path: &str, query_string: String) -> FetchOutcome {
        let generation = self.begin_request();
        let url = format!("{}{}?{}", self.base_url, path, query_string);
        debug!(%url, generation, "issuing listing fetch");

        FetchOutcome {
            generation,
            result: self.request(&url).await,
        }
    }

    async fn request(&self, url: &str) -> Result<PageEnvelope, ClientError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            #[derive(Deserialize)]
            struct ErrorBody {
                error: String,
            }
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Request failed with status {status}"));
            return Err(ClientError::Api(message));
        }
        Ok(response.json::<PageEnvelope>().await?)
    }
}
