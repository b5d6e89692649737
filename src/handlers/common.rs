//! Shared helpers for HTTP handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// 200 OK with a JSON body.
pub fn success_response<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(data))
}

/// 201 Created with a JSON body.
pub fn created_response<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(data))
}

/// 204 No Content.
pub fn no_content_response() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
