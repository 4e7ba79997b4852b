use std::sync::Arc;

use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use tracker_api::{ApiConfig, ApiServer};
use tracker_db::{DatabaseConfig, DatabasePool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("tracker_api=info".parse()?)
                .add_directive("tracker_db=info".parse()?),
        )
        .init();

    info!("Alpha Tracker starting...");

    // Store credentials are required; there is no degraded mode.
    let db_config = DatabaseConfig::from_env();
    let db_pool = match DatabasePool::new(&db_config).await {
        Ok(pool) => Arc::new(pool),
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = db_pool.health_check().await {
        error!(error = %e, "Database health check failed");
        std::process::exit(1);
    }
    info!("Database connection verified");

    let api_config = ApiConfig::from_env();
    let server = ApiServer::new(api_config, db_pool.clone());
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!(error = %e, "API server error");
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = server_handle => {
            error!("API server stopped unexpectedly");
        }
    }

    db_pool.close().await;
    info!("Alpha Tracker shutdown complete");
    Ok(())
}
