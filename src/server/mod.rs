//! HTTP server.
//!
//! This module provides:
//! - The axum router exposing [`AstraService`](crate::AstraService) (`router`)
//! - Request handlers and error mapping (`handlers`)
//! - Configuration loading for `astrad` (`config`)

pub mod config;
mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::AstraService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AstraService>,
}

impl AppState {
    pub fn new(service: Arc<AstraService>) -> Self {
        Self { service }
    }
}

/// Build the router: API routes, the homepage, and static assets from
/// `static_dir`.
pub fn router(state: AppState, static_dir: impl Into<PathBuf>) -> Router {
    let static_dir = static_dir.into();

    api_routes()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&static_dir))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/suggestions", get(handlers::suggestions))
        .route("/astra/exoplanets", get(handlers::exoplanets))
        .route("/astra/search", get(handlers::search))
        .route("/astra/raw", get(handlers::raw))
        .route("/object/:name", get(handlers::object))
}
