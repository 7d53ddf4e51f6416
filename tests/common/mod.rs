//! Utilidades compartidas por los tests de integración

#![allow(dead_code)]

use axum::{body::Body, http::StatusCode, Router};
use http::{header, Method, Request};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use fleet_backoffice::{build_app, config::EnvironmentConfig, state::AppState, utils::jwt::JwtConfig};

pub const SECRET: &str = "integration-secret";

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: SECRET.to_string(),
        jwt_expiration: 3600,
        cors_origins: Vec::new(),
        log_level: "debug".to_string(),
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        expiration: 3600,
    }
}

pub fn app_with(pool: PgPool) -> Router {
    build_app(AppState::new(pool, test_config()))
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
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

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
