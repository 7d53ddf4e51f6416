//! Back office de gestión de flota
//!
//! API REST para camiones, remolques, neumáticos, trayectos, chauffeurs y
//! mantenimiento, con autenticación JWT y control de acceso por rol.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación, listo para `axum::serve`
pub fn build_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::create_api_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet_backoffice",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
