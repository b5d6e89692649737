use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{created_response, no_content_response, success_response};
use crate::errors::ServiceError;
use crate::services::spare_parts::{CreateSparePartRequest, UpdateSparePartRequest};
use crate::AppState;

/// Spare part inventory routes, nested under `/api/spare-parts`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_spare_parts).post(create_spare_part))
        .route(
            "/:id",
            get(get_spare_part)
                .put(update_spare_part)
                .delete(delete_spare_part),
        )
}

async fn create_spare_part(
    State(state): State<AppState>,
    Json(payload): Json<CreateSparePartRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.spare_parts.create(payload).await?;
    Ok(created_response(created))
}

async fn update_spare_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSparePartRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.spare_parts.update(id, payload).await?;
    Ok(success_response(updated))
}

async fn delete_spare_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.spare_parts.delete(id).await?;
    Ok(no_content_response())
}

async fn get_spare_part(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let part = state.services.spare_parts.get(id).await?;
    Ok(success_response(part))
}

async fn list_spare_parts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let parts = state.services.spare_parts.list().await?;
    Ok(success_response(parts))
}
