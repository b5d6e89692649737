use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::common::{created_response, no_content_response, success_response};
use crate::errors::ServiceError;
use crate::services::batteries::{CreateBatteryRequest, UpdateBatteryRequest};
use crate::AppState;

/// Inverter battery inventory routes, nested under `/api/batteries`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_batteries).post(create_battery))
        .route(
            "/:id",
            get(get_battery).put(update_battery).delete(delete_battery),
        )
}

async fn create_battery(
    State(state): State<AppState>,
    Json(payload): Json<CreateBatteryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.batteries.create(payload).await?;
    Ok(created_response(created))
}

async fn update_battery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBatteryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.batteries.update(id, payload).await?;
    Ok(success_response(updated))
}

async fn delete_battery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.batteries.delete(id).await?;
    Ok(no_content_response())
}

async fn get_battery(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let battery = state.services.batteries.get(id).await?;
    Ok(success_response(battery))
}

async fn list_batteries(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let batteries = state.services.batteries.list().await?;
    Ok(success_response(batteries))
}
