use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session control
        .route("/sessions/start", post(handlers::start_session))
        .route("/sessions/:session_id/pause", post(handlers::pause_session))
        .route(
            "/sessions/:session_id/resume",
            post(handlers::resume_session),
        )
        .route("/sessions/:session_id/stop", post(handlers::stop_session))
        // Session queries
        .route(
            "/sessions/:session_id/state",
            get(handlers::get_session_state),
        )
        // Technique catalog
        .route("/techniques", get(handlers::list_techniques))
        .route("/techniques/:technique_id", get(handlers::get_technique))
        // Cue artifacts
        .route(
            "/artifacts/:technique_id/:voice_id",
            get(handlers::get_artifact),
        )
        .route("/artifacts/extract", post(handlers::extract_artifact))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
