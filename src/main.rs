use std::sync::Arc;

use migration::MigratorTrait;
use onpoint_analyzer::{AppError, Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onpoint_analyzer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    // Initialize database connection
    let db = sea_orm::Database::connect(&config.database_url)
        .await
        .map_err(AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None)
        .await
        .map_err(AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    // Initialize repository and services
    let repository = Arc::new(onpoint_analyzer::db::AnalysisRequestRepository::new(db));
    let analysis_request_service =
        Arc::new(onpoint_analyzer::services::AnalysisRequestService::new(repository));

    // Build application router
    let state = onpoint_analyzer::api::AppState::new(analysis_request_service);
    let app = onpoint_analyzer::api::router(state);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(())
}
