//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use boxoffice_core::clock::Clock;
use boxoffice_test_support::{FixedClock, InMemoryTicketRepository};
use http_body_util::BodyExt;
use tower::ServiceExt;

use boxoffice_api::routes;
use boxoffice_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router backed by an in-memory repository and a
/// deterministic clock. Uses the same route structure as `main.rs`; clone
/// the returned router per request to share state across calls.
pub fn build_test_app() -> Router {
    let repository = Arc::new(InMemoryTicketRepository::new());
    let app_state = AppState::new(repository, fixed_clock());

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/events", routes::events::router())
        .nest("/api/v1/purchases", routes::purchases::router())
        .with_state(app_state)
}

fn with_buyer(
    builder: axum::http::request::Builder,
    buyer: Option<&str>,
) -> axum::http::request::Builder {
    match buyer {
        Some(buyer_id) => builder
            .header("x-buyer-id", buyer_id)
            .header("x-buyer-name", "Ada Lovelace")
            .header("x-buyer-email", "ada@example.com"),
        None => builder,
    }
}

async fn into_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    buyer: Option<&str>,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = with_buyer(Request::builder().method("POST").uri(uri), buyer)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    into_json(app.oneshot(request).await.unwrap()).await
}

/// Send a GET request and return the response.
pub async fn get_json(
    app: Router,
    uri: &str,
    buyer: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let request = with_buyer(Request::builder().method("GET").uri(uri), buyer)
        .body(Body::empty())
        .unwrap();

    into_json(app.oneshot(request).await.unwrap()).await
}

/// Create an event through the API and return its id as a string.
pub async fn seed_event(app: &Router, title: &str, price: &str, available_tickets: i32) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/events",
        None,
        &serde_json::json!({
            "title": title,
            "price": price,
            "available_tickets": available_tickets
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["event_id"].as_str().unwrap().to_owned()
}
