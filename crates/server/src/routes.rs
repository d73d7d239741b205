//! API Routes

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Banking routes
        .route("/transfer", post(handlers::transfer))
        .route("/dashboard", get(handlers::dashboard))

        // Complaint routes
        .route("/complaints", post(handlers::submit_complaint))
        .route("/complaints/:complaint_id", get(handlers::get_complaint))

        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
