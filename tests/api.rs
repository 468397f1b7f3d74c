use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use pomodoro_clock::{
    create_router,
    services::SilentAlert,
    state::{Delta, LengthKind},
    Controller,
};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> (Router, Arc<Controller>) {
    let controller = Controller::create(Arc::new(SilentAlert));
    (create_router(Arc::clone(&controller)), controller)
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn status_reports_defaults() {
    let (app, _) = app();
    let (status, body) = call(&app, Method::GET, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["time"], "25:00");
    assert_eq!(body["timer"]["phase"], "Session");
    assert_eq!(body["timer"]["break_minutes"], 5);
    assert_eq!(body["timer"]["session_minutes"], 25);
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["timer"]["dark_mode"], false);
    assert!(body["last_action"].is_null());
}

#[tokio::test]
async fn adjust_endpoints_step_lengths() {
    let (app, _) = app();

    let (status, body) = call(&app, Method::POST, "/session/increment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_minutes"], 26);
    assert_eq!(body["time"], "26:00");

    let (_, body) = call(&app, Method::POST, "/break/decrement").await;
    assert_eq!(body["break_minutes"], 4);
    assert_eq!(body["time"], "26:00");

    let (_, body) = call(&app, Method::GET, "/status").await;
    assert_eq!(body["last_action"], "adjust");
}

#[tokio::test]
async fn unknown_adjustment_is_not_found() {
    let (app, controller) = app();

    let (status, _) = call(&app, Method::POST, "/lunch/increment").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::POST, "/break/double").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(controller.snapshot().unwrap().break_minutes, 5);
}

#[tokio::test]
async fn start_toggles_and_reset_restores() {
    let (app, _) = app();

    let (_, body) = call(&app, Method::POST, "/start").await;
    assert_eq!(body["running"], true);

    let (_, body) = call(&app, Method::POST, "/start").await;
    assert_eq!(body["running"], false);

    call(&app, Method::POST, "/session/decrement").await;
    call(&app, Method::POST, "/start").await;
    let (_, body) = call(&app, Method::POST, "/reset").await;
    assert_eq!(body["running"], false);
    assert_eq!(body["on_break"], false);
    assert_eq!(body["session_minutes"], 25);
    assert_eq!(body["remaining_seconds"], 1500);
}

#[tokio::test]
async fn theme_toggles_dark_mode() {
    let (app, _) = app();

    let (_, body) = call(&app, Method::POST, "/theme").await;
    assert_eq!(body["dark_mode"], true);
    let (_, body) = call(&app, Method::POST, "/theme").await;
    assert_eq!(body["dark_mode"], false);
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = app();
    let (status, body) = call(&app, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn events_stream_current_state_then_changes() {
    let (app, controller) = app();
    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    let mut frames = response.into_body().into_data_stream();

    let first = frames.next().await.unwrap().unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("event: timer"));
    assert!(first.contains("\"time\":\"25:00\""));

    controller.adjust(LengthKind::Session, Delta::Increment).unwrap();

    let next = frames.next().await.unwrap().unwrap();
    let next = String::from_utf8(next.to_vec()).unwrap();
    assert!(next.contains("event: timer"));
    assert!(next.contains("\"session_minutes\":26"));
    assert!(next.contains("\"time\":\"26:00\""));
}
