pub mod config;
pub mod params;
pub mod server;

pub use config::ApiConfig;
pub use server::ApiServer;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracker_db::DatabaseError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Server error: {0}")]
    Server(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error(
        "Enrichment columns are missing from the store: apply grok_profile_migration.sql, then retry"
    )]
    MissingEnrichmentSchema,
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        let msg = err.to_string();
        // A query that references grok_* columns before the enrichment
        // migration ran fails with "column ... does not exist"; surface an
        // actionable message instead of the raw store error.
        if msg.contains("does not exist") && msg.contains("grok_") {
            ApiError::MissingEnrichmentSchema
        } else {
            ApiError::Database(msg)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_enrichment_column_is_rewritten() {
        let err = DatabaseError::Query(
            "error returned from database: column \"grok_checked_at\" does not exist".to_string(),
        );
        assert!(matches!(ApiError::from(err), ApiError::MissingEnrichmentSchema));
    }

    #[test]
    fn other_store_errors_pass_through() {
        let err = DatabaseError::Query("connection reset".to_string());
        match ApiError::from(err) {
            ApiError::Database(msg) => assert!(msg.contains("connection reset")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
