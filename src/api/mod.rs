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
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(start_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/add", post(add_time_handler))
        .route("/timer/remove", post(remove_time_handler))
        .route("/timer/duration", post(duration_handler))
        .route("/alarm/stop", post(stop_alarm_handler))
        // Pointer input from the dial widget
        .route("/dial/press", post(press_handler))
        .route("/dial/drag-begin", post(drag_begin_handler))
        .route("/dial/drag-update", post(drag_update_handler))
        .route("/dial/drag-end", post(drag_end_handler))
        .route("/dial/resize", post(resize_handler))
        .route("/dial.svg", get(dial_svg_handler))
        .route("/dial/scene", get(dial_scene_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
