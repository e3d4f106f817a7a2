//! followup server library - HTTP API for the Drive-backed follow-up tracker.
//!
//! This library provides the HTTP routes and application state for the
//! followup API server. It's separated from main.rs to enable
//! integration testing.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{get, patch, post};
use state::AppState;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router over shared state.
pub fn app(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Tasks
        .route("/tasks", get(routes::tasks::list).post(routes::tasks::create))
        .route(
            "/tasks/{id}",
            patch(routes::tasks::update).delete(routes::tasks::delete),
        )
        // Contacts
        .route(
            "/contacts",
            get(routes::contacts::list).post(routes::contacts::create),
        )
        .route(
            "/contacts/{id}",
            get(routes::contacts::get).patch(routes::contacts::update),
        )
        .route(
            "/contacts/{id}/interactions",
            get(routes::interactions::list_for_contact),
        )
        // Interaction log
        .route("/interactions", post(routes::interactions::create))
        // Quick-entry date resolution
        .route("/parse-date", get(routes::dates::parse))
        .route("/health", get(routes::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
