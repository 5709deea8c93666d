#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use tower::ServiceExt;

use items_api_rust::app::app;
use items_api_rust::auth::{Argon2Hasher, PasswordHasher};
use items_api_rust::config::AppConfig;
use items_api_rust::state::AppState;

/// Router over a fresh in-memory store with cheap argon2 parameters
pub fn test_app() -> Router {
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(Argon2Hasher::new(8, 1, 1).expect("valid argon2 params"));
    let state = AppState::memory(hasher).expect("state builds");
    app(state, &AppConfig::development())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub www_authenticate: Option<String>,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some((username, password)) = auth {
        let encoded = STANDARD.encode(format!("{}:{}", username, password));
        builder = builder.header(header::AUTHORIZATION, format!("Basic {}", encoded));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await.context("router call failed")?;

    let status = response.status();
    let www_authenticate = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(TestResponse {
        status,
        www_authenticate,
        body,
    })
}

pub async fn signup(app: &Router, username: &str, password: &str) -> Result<TestResponse> {
    send(
        app,
        Method::POST,
        "/auth/signup",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await
}
