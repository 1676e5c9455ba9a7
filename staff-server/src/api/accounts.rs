//! Account handlers
//!
//! POST /api/accounts/signup       - create account + send verification code
//! POST /api/accounts/verify-email - confirm the emailed code
//! POST /api/accounts/resend-code  - send a fresh code
//! POST /api/employees/join        - redeem a join code (session required)

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::{
    Employee, JoinCorporationRequest, ResendCodeRequest, User, UserSignup, VerifyEmailRequest,
};

use crate::auth::CurrentUser;
use crate::core::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<UserSignup>,
) -> AppResult<(StatusCode, Json<User>)> {
    let created = state.accounts.sign_up(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> AppResult<Json<User>> {
    Ok(Json(state.accounts.verify_email(req).await?))
}

pub async fn resend_code(
    State(state): State<AppState>,
    Json(req): Json<ResendCodeRequest>,
) -> AppResult<ApiResponse<()>> {
    state.accounts.resend_verification_code(req).await?;
    Ok(ApiResponse::ok())
}

pub async fn join_corporation(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<JoinCorporationRequest>,
) -> AppResult<Json<Employee>> {
    let joined = state
        .accounts
        .join_corporation(current.user.id, &req.join_code)
        .await?;
    Ok(Json(joined))
}
