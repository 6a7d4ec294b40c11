//! Official Gazette portal backend.
//!
//! Browses journal issues and official texts through one filter model, served
//! from an in-memory mock data source or forwarded to a remote backend.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod query;
pub mod service;
pub mod store;
pub mod view;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use service::ServiceState;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ServiceState,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Journal issues
        .route("/journaux", get(api::list_issues))
        .route("/journaux/{id}", get(api::get_issue))
        .route("/journaux/{id}/textes", get(api::get_issue_texts))
        // Official texts
        .route("/textes", get(api::list_texts))
        .route("/textes/{id}", get(api::get_text))
        // Reference data
        .route("/institutions", get(api::list_institutions))
        .route("/archives", get(api::list_archives))
        .route("/archives/{annee}", get(api::get_archive_year))
        .route("/statistiques", get(api::get_statistics));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
