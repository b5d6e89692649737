//! Back-office API for a spare-parts and inverter-battery shop.
//!
//! The crate exposes a REST surface for inventory CRUD, atomic sale
//! recording with stock deduction, filtered sale history, OTP-based phone
//! login, and local product-image uploads.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::handlers::AppServices;

/// Shared application state available to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub services: AppServices,
}

/// Assembles the `/api` router. The caller nests this under `/api` and adds
/// the cross-cutting layers (tracing, CORS, auth-service injection).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", handlers::auth::routes())
        .nest("/spare-parts", handlers::spare_parts::routes())
        .nest("/batteries", handlers::batteries::routes())
        .nest("/sales", handlers::sales::routes())
        .nest("/images", handlers::images::routes())
}

/// Liveness endpoint that also verifies database connectivity.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match db::check_connection(&state.db).await {
        Ok(()) => "ok",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": if database == "ok" { "ok" } else { "degraded" },
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Root banner, useful for smoke checks.
pub async fn root_banner() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Builds the full application router around an assembled state. The caller
/// still adds cross-cutting layers (static files, tracing, CORS, auth
/// injection) on top.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_banner))
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
}
