use crate::config::ApiConfig;
use crate::params::RawListingParams;
use crate::{ApiError, Result};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracker_core::{EligibilityGate, PageEnvelope, SortOrder};
use tracker_db::{repositories::AccountRepository, DatabasePool};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    db: Arc<DatabasePool>,
}

/// Listing API server
pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiConfig, db: Arc<DatabasePool>) -> Self {
        Self {
            config,
            state: AppState { db },
        }
    }

    /// Build the router; split out so tests can drive it directly.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/api/records", get(list_records))
            .route("/api/featured", get(list_featured))
            .route("/health", get(health_check))
            .with_state(state)
    }

    /// Start the server
    pub async fn run(self) -> Result<()> {
        let addr = self.config.address();

        let cors = if self.config.cors_enabled {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
        };

        let app = Self::router(self.state)
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        info!(address = %addr, "Starting listing API server");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::Server(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ApiError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Discover listing: recently registered accounts, base columns only.
async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<RawListingParams>,
) -> Result<Json<PageEnvelope>> {
    let mut query = params.into_query();
    // Discover has no caller-selectable ordering.
    query.sort = SortOrder::default();

    debug!(
        page = query.page,
        page_size = query.page_size,
        categories = query.categories.len(),
        "discover listing"
    );

    let (items, total) =
        AccountRepository::list_discover(state.db.inner(), &query, &EligibilityGate::discover())
            .await?;

    Ok(Json(PageEnvelope {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// Featured listing: eligibility-gated accounts with their enrichment block.
async fn list_featured(
    State(state): State<AppState>,
    Query(params): Query<RawListingParams>,
) -> Result<Json<PageEnvelope>> {
    let query = params.into_query();

    debug!(
        page = query.page,
        page_size = query.page_size,
        sort = query.sort.as_token(),
        "featured listing"
    );

    let (items, total) =
        AccountRepository::list_featured(state.db.inner(), &query, &EligibilityGate::featured())
            .await?;

    Ok(Json(PageEnvelope {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(()) => (axum::http::StatusCode::OK, "OK"),
        Err(_) => (axum::http::StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
    }
}
