//! Forklift pre-use checklist: relay API in front of the Apps Script
//! gateway, plus the server-rendered dashboard and checklist form.

pub mod analysis;
pub mod api;
pub mod client;
pub mod config;
pub mod controllers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Full application router: `/api` relay routes, `/health` and the pages.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/api", api::create_api_router())
        .route("/health", get(api::health::health))
        .merge(routes::page_routes::create_page_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
