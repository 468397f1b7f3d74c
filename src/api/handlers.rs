//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error};

use crate::state::{Controller, Delta, LengthKind, TimerSnapshot};
use super::responses::{HealthResponse, StatusResponse, TimerView};

fn respond(action: &str, result: Result<TimerSnapshot, String>) -> Result<Json<TimerView>, StatusCode> {
    match result {
        Ok(snapshot) => {
            debug!("{} endpoint called", action);
            Ok(Json(TimerView::new(snapshot)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or pause the countdown
pub async fn start_handler(State(controller): State<Arc<Controller>>) -> Result<Json<TimerView>, StatusCode> {
    respond("start", controller.start())
}

/// Handle POST /reset - Stop and restore defaults
pub async fn reset_handler(State(controller): State<Arc<Controller>>) -> Result<Json<TimerView>, StatusCode> {
    respond("reset", controller.reset())
}

/// Handle POST /:kind/:delta - Step the break or session length
pub async fn adjust_handler(
    State(controller): State<Arc<Controller>>,
    Path((kind, delta)): Path<(String, String)>,
) -> Result<Json<TimerView>, StatusCode> {
    let (Some(kind), Some(delta)) = (LengthKind::from_str(&kind), Delta::from_str(&delta)) else {
        debug!("Unknown adjustment {}/{}", kind, delta);
        return Err(StatusCode::NOT_FOUND);
    };

    respond("adjust", controller.adjust(kind, delta))
}

/// Handle POST /theme - Toggle dark mode
pub async fn theme_handler(State(controller): State<Arc<Controller>>) -> Result<Json<TimerView>, StatusCode> {
    respond("toggle theme", controller.toggle_dark_mode())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(controller): State<Arc<Controller>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match controller.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = controller.last_action();

    Ok(Json(StatusResponse {
        timer: TimerView::new(snapshot),
        uptime: controller.uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a view of the timer every time it changes
pub async fn events_handler(
    State(controller): State<Arc<Controller>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let snapshots = controller.subscribe();

    let stream = stream::unfold((snapshots, true), |(mut snapshots, first)| async move {
        // the current state goes out straight away, then one event per change
        if !first && snapshots.changed().await.is_err() {
            return None;
        }

        let view = TimerView::new(*snapshots.borrow_and_update());
        let event = match serde_json::to_string(&view) {
            Ok(json) => Event::default().event("timer").data(json),
            Err(e) => {
                error!("Failed to serialize timer view: {}", e);
                Event::default().comment("serialization error")
            }
        };
        Some((Ok(event), (snapshots, false)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
