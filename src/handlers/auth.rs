use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::AppState;

/// OTP login routes, nested under `/api/auth`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
}

#[derive(Debug, Deserialize)]
pub struct SendOtpParams {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpParams {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct OtpIssuedResponse {
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issues a one-time password for an allowed phone number.
///
/// There is no SMS gateway; the code is returned in the response so the
/// shop owner's client can present it.
async fn send_otp(
    State(state): State<AppState>,
    Query(params): Query<SendOtpParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let otp = state.services.otp.send_otp(&params.phone).await?;
    Ok(Json(OtpIssuedResponse { otp }))
}

/// Verifies the (phone, otp) pair and exchanges it for a bearer token.
async fn verify_otp(
    State(state): State<AppState>,
    Query(params): Query<VerifyOtpParams>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .otp
        .verify_otp(&params.phone, &params.otp)
        .await?;

    let token = state.services.auth.generate_token(&params.phone)?;
    Ok(Json(TokenResponse { token }))
}
