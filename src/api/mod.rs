use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod analysis_request;
pub mod contact;

use crate::services::AnalysisRequestService;

#[derive(Clone)]
pub struct AppState {
    pub analysis_request_service: Arc<AnalysisRequestService>,
}

impl AppState {
    pub fn new(analysis_request_service: Arc<AnalysisRequestService>) -> Self {
        Self {
            analysis_request_service,
        }
    }
}

/// Application router. `main` serves it; tests drive it directly or over
/// an ephemeral listener.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/analysis-requests",
            post(analysis_request::create_analysis_request)
                .get(analysis_request::list_analysis_requests),
        )
        .route(
            "/api/analysis-requests/{id}",
            get(analysis_request::get_analysis_request),
        )
        .route("/api/contact", post(contact::submit_contact))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health_check() -> &'static str {
    "OK"
}
