//! Endpoint tests driving the router in-process.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;
use upwait_core::core::CoreContext;
use upwait_server::{router, state::AppState, API_PATH};

fn app() -> Router {
    router(AppState::new(&CoreContext::in_memory()).unwrap())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value, axum::http::HeaderMap) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body, headers)
}

async fn get(app: &Router, query: &str) -> (StatusCode, Value) {
    let request = Request::get(format!("{API_PATH}?{query}"))
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(app, request).await;
    (status, body)
}

async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::post(API_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body, _) = send(app, request).await;
    (status, body)
}

async fn vote(app: &Router, name: &str, vote_type: &str) -> (StatusCode, Value) {
    post_raw(app, &json!({ "name": name, "voteType": vote_type }).to_string()).await
}

#[tokio::test]
async fn test_preflight_returns_empty_ok_with_cors_headers() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(API_PATH)
        .body(Body::empty())
        .unwrap();

    let (status, body, headers) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let app = app();
    let request = Request::get(format!("{API_PATH}?search=nothing"))
        .body(Body::empty())
        .unwrap();

    let (status, _, headers) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_first_vote_creates_item() {
    let app = app();

    let (status, body) = vote(&app, "iOS 17", "up").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "iOS 17");
    assert_eq!(body["up_votes"], 1);
    assert_eq!(body["down_votes"], 0);
    assert_eq!(body["verdict"], "UPDATE");
    assert!(body["last_updated"].is_string());
}

#[tokio::test]
async fn test_votes_accumulate_and_tie_waits() {
    let app = app();

    vote(&app, "Windows 11", "up").await;
    let (status, body) = vote(&app, "windows 11", "down").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Windows 11");
    assert_eq!(body["up_votes"], 1);
    assert_eq!(body["down_votes"], 1);
    assert_eq!(body["verdict"], "WAIT");
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = app();
    vote(&app, "iOS 17", "up").await;

    let (status, body) = get(&app, "search=IOS%2017").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "iOS 17");
}

#[tokio::test]
async fn test_search_missing_or_blank_is_bad_request() {
    let app = app();

    let (status, body) = get(&app, "search=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Search term required" }));

    let (status, _) = get(&app, "search=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search term required");
}

#[tokio::test]
async fn test_search_unknown_is_not_found() {
    let app = app();

    let (status, body) = get(&app, "search=nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_suggest_ranks_prefix_above_substring() {
    let app = app();
    for _ in 0..5 {
        vote(&app, "iOS 17", "up").await;
    }
    for _ in 0..2 {
        vote(&app, "iOS 17", "down").await;
    }
    vote(&app, "iOS 18", "up").await;
    vote(&app, "iOS 18", "down").await;
    for _ in 0..9 {
        vote(&app, "Kobo iOS reader", "up").await;
    }
    vote(&app, "Android 14", "up").await;

    let (status, body) = get(&app, "suggest=ios").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["iOS 17", "iOS 18", "Kobo iOS reader"]);
}

#[tokio::test]
async fn test_suggest_short_term_is_empty() {
    let app = app();
    vote(&app, "iOS 17", "up").await;

    let (status, body) = get(&app, "suggest=i").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "suggestions": [] }));
}

#[tokio::test]
async fn test_trending_and_popular_listings() {
    let app = app();
    vote(&app, "Pixel 8", "up").await;
    vote(&app, "Pixel 8", "up").await;
    vote(&app, "Pixel 8", "down").await;
    vote(&app, "macOS Sonoma", "down").await;

    let (status, body) = get(&app, "trending").await;
    assert_eq!(status, StatusCode::OK);
    let trending = body["trending"].as_array().unwrap();
    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0]["name"], "macOS Sonoma");

    let (status, body) = get(&app, "popular_devices").await;
    assert_eq!(status, StatusCode::OK);
    let popular = body["popular"].as_array().unwrap();
    assert_eq!(popular[0]["name"], "Pixel 8");
    assert_eq!(popular[0]["update_count"], 3);
    assert_eq!(popular[0]["verdict"], "UPDATE");
    assert_eq!(popular[1]["name"], "macOS Sonoma");
}

#[tokio::test]
async fn test_listings_empty_store() {
    let app = app();

    let (_, body) = get(&app, "trending").await;
    assert_eq!(body, json!({ "trending": [] }));

    let (_, body) = get(&app, "popular_devices").await;
    assert_eq!(body, json!({ "popular": [] }));
}

#[tokio::test]
async fn test_invalid_vote_type_is_rejected_without_mutation() {
    let app = app();
    vote(&app, "X", "up").await;

    let (status, body) = vote(&app, "X", "sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Valid name and vote type (up/down) required" })
    );

    let (_, body) = get(&app, "search=x").await;
    assert_eq!(body["up_votes"], 1);
    assert_eq!(body["down_votes"], 0);
}

#[tokio::test]
async fn test_malformed_vote_bodies_are_rejected() {
    let app = app();

    for body in [
        "not json",
        "{}",
        r#"{"voteType":"up"}"#,
        r#"{"name":"","voteType":"up"}"#,
        r#"{"name":"   ","voteType":"down"}"#,
        r#"{"name":"X"}"#,
        r#"{"name":42,"voteType":"up"}"#,
        r#"{"name":"X","voteType":"UP"}"#,
    ] {
        let (status, response) = post_raw(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["error"], "Valid name and vote type (up/down) required");
    }

    let (_, body) = get(&app, "trending").await;
    assert_eq!(body, json!({ "trending": [] }));
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let app = app();

    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let request = Request::builder()
            .method(method.clone())
            .uri(API_PATH)
            .body(Body::empty())
            .unwrap();
        let (status, body, headers) = send(&app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method: {method}");
        assert_eq!(body, json!({ "error": "Method not allowed" }));
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let dir = tempdir().unwrap();
    let ctx = CoreContext::new(&dir.path().join("upwait.db"));
    let app = router(AppState::new(&ctx).unwrap());
    vote(&app, "iOS 17", "up").await;

    // Pull the table out from under the server's connection
    ctx.open_store()
        .unwrap()
        .conn()
        .execute_batch("DROP TABLE items")
        .unwrap();

    let request = Request::get(format!("{API_PATH}?trending"))
        .body(Body::empty())
        .unwrap();
    let (status, body, headers) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("items"), "error: {message}");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");

    let (status, body) = vote(&app, "iOS 17", "up").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_head_is_not_served_as_get() {
    let app = app();
    vote(&app, "iOS 17", "up").await;

    let request = Request::builder()
        .method(Method::HEAD)
        .uri(format!("{API_PATH}?search=ios%2017"))
        .body(Body::empty())
        .unwrap();
    let (status, _, headers) = send(&app, request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_concurrent_votes_both_register() {
    let app = app();
    vote(&app, "iOS 18", "up").await;

    let (a, b) = tokio::join!(vote(&app, "iOS 18", "up"), vote(&app, "iOS 18", "up"));
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);

    let (_, body) = get(&app, "search=ios%2018").await;
    assert_eq!(body["up_votes"], 3);
}

#[tokio::test]
async fn test_root_path_serves_same_endpoint() {
    let app = app();
    vote(&app, "Galaxy S24", "down").await;

    let request = Request::get("/?search=galaxy%20s24")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verdict"], "WAIT");
}
