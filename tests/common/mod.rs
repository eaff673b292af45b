#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Sends `request` through a fresh clone of `app` and decodes the JSON body
/// (or `Value::Null` for an empty one).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    request("GET", uri, authorization, None)
}

pub fn delete(uri: &str, authorization: Option<&str>) -> Request<Body> {
    request("DELETE", uri, authorization, None)
}

pub fn post_json(uri: &str, authorization: Option<&str>, body: Value) -> Request<Body> {
    request("POST", uri, authorization, Some(body))
}

pub fn put_json(uri: &str, authorization: Option<&str>, body: Value) -> Request<Body> {
    request("PUT", uri, authorization, Some(body))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
