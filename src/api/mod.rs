//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::Controller;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(controller: Arc<Controller>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/reset", post(reset_handler))
        .route("/theme", post(theme_handler))
        // /break/increment, /session/decrement, ...
        .route("/:kind/:delta", post(adjust_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(controller)
}
