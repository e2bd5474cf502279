#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use farmhut_backend_rs::app;
use farmhut_backend_rs::test_utils::test_helpers;
use farmhut_backend_rs::types::Context;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// The full router wired to a fresh in-memory database, plus the context
/// so tests can inspect rows directly.
pub async fn test_app() -> (Router, Arc<Context>) {
    let ctx = test_helpers::create_test_context().await;
    (app::build_router(ctx.clone()), ctx)
}

pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, _, bytes) = send(router, method, uri, token, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn request_raw(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, HeaderMap, String) {
    let (status, headers, bytes) = send(router, method, uri, token, None).await;

    (status, headers, String::from_utf8(bytes).unwrap())
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    (status, headers, bytes)
}

pub async fn register(
    router: &Router,
    user_type: &str,
    name: &str,
    mobile_number: &str,
    password: &str,
) {
    let (status, _) = request(
        router,
        "POST",
        "/register",
        None,
        Some(json!({
            "user_type": user_type,
            "name": name,
            "place": "Madurai",
            "dob": "1990-01-01",
            "mobile_number": mobile_number,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

pub async fn login(router: &Router, mobile_number: &str, password: &str) -> Value {
    let (status, body) = request(
        router,
        "POST",
        "/login",
        None,
        Some(json!({ "mobile_number": mobile_number, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body
}

pub async fn register_and_login(
    router: &Router,
    user_type: &str,
    name: &str,
    mobile_number: &str,
    password: &str,
) -> String {
    register(router, user_type, name, mobile_number, password).await;
    let body = login(router, mobile_number, password).await;

    body["token"].as_str().unwrap().to_string()
}
