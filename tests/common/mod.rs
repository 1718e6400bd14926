//! Общие помощники для интеграционных тестов API.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rail_booking::config::Config;
use rail_booking::AppState;

pub const CONFIG: &str = r#"
sections:
  - { name: "A", max_seats: 20 }
  - { name: "B", max_seats: 20 }
stations:
  - { from: "London", to: "France", price: 20.0 }
"#;

pub fn state_from(yaml: &str) -> Arc<AppState> {
    let config = Config::from_yaml_str(yaml).unwrap();
    AppState::new(config).unwrap()
}

pub fn build_test_app() -> (Router, Arc<AppState>) {
    let state = state_from(CONFIG);
    (rail_booking::app(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

pub async fn purchase(app: &Router, email: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        "POST",
        "/api/tickets",
        Some(serde_json::json!({
            "user": { "email": email, "first_name": "Sanjay", "last_name": "Kishor" },
            "from": "London",
            "to": "France"
        })),
    )
    .await
}
