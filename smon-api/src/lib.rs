//! smon-api library - Social activity monitor HTTP service
//!
//! Thin plumbing around the `smon-common` core: an axum router, a SQLite
//! persistence layer, and handlers wiring ingestion, querying, aggregation
//! and export to HTTP endpoints.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// CORS is permissive: the dashboard is served from another origin.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route("/api/health", get(api::health_check))
        .route(
            "/api/activities",
            get(api::list_activities).post(api::ingest_activities),
        )
        .route("/api/activities/aggregate", get(api::aggregate_activities))
        .route("/api/activities/export", get(api::export_activities))
        .route("/api/activities/bulk_delete", post(api::bulk_delete_activities))
        .route("/api/activities/:id", delete(api::delete_activity))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
