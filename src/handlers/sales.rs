use axum::{
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use super::common::{created_response, success_response};
use crate::auth::require_auth;
use crate::errors::ServiceError;
use crate::services::sales::{CreateSaleRequest, SalesQuery};
use crate::AppState;

/// Sale routes, nested under `/api/sales`. Reading the history requires a
/// bearer token; recording a sale does not.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_sales).route_layer(middleware::from_fn(require_auth)),
        )
        .route("/", post(create_sale))
}

async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = state.services.sales.create_sale(payload).await?;
    Ok(created_response(sale))
}

async fn get_sales(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let sales = state.services.sales.get_sales(query).await?;
    Ok(success_response(sales))
}
