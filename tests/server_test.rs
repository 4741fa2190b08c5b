mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpers::{paged_backend, reply, MockClient};
use lifejournal::config::JournalConfig;
use lifejournal::server::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router(client: Arc<MockClient>) -> axum::Router {
    build_router(AppState {
        client,
        config: Arc::new(JournalConfig::default()),
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let response = router(paged_backend(1))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn index_renders_full_page() {
    let client = paged_backend(2);
    let response = router(client.clone())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("Conversation 0"));
    assert!(page.contains("Log 1"));
    assert!(page.contains("id=\"run-button\""));
    assert_eq!(client.requests().len(), 4);
}

#[tokio::test]
async fn fragment_returns_cards_and_controls() {
    let client = paged_backend(5);
    let response = router(client.clone())
        .oneshot(
            Request::get("/fragments/facts?page=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Fact 1"));
    assert!(html.contains("Page 3 of 5"));
    assert_eq!(
        client.last_request().unwrap().query_value("page"),
        Some("3")
    );
}

#[tokio::test]
async fn fragment_all_skips_pagination() {
    let client = paged_backend(5);
    let response = router(client.clone())
        .oneshot(
            Request::get("/fragments/todos?all=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Task 0"));
    assert!(!html.contains("pagination"));
    assert!(client.last_request().unwrap().query.is_empty());
}

#[tokio::test]
async fn unknown_fragment_endpoint_is_not_found() {
    let response = router(paged_backend(1))
        .oneshot(Request::get("/fragments/notes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn run_proxies_to_execute() {
    let client = MockClient::new(|_| reply(500, json!({"success": false, "error": "boom"})));
    let response = router(client.clone())
        .oneshot(
            Request::post("/run")
                .header("content-type", "application/json")
                .body(Body::from(json!({"code": "1/0"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"], "boom");
    assert_eq!(body["output"], "");
    assert_eq!(
        client.last_request().unwrap().body,
        Some(json!({"code": "1/0"}))
    );
}
