//! Employee handlers (scoped under a corporation)
//!
//! Every route requires a session. Corporation admin rights are not checked.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use shared::error::{ApiResponse, AppResult};
use shared::models::{EmployeeCreate, EmployeeJoinCodeResend, EmployeeResponse, EmployeeUpdate};

use crate::auth::CurrentUser;
use crate::core::AppState;

pub async fn register(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(cor_id): Path<i64>,
    Json(req): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let created = state
        .employees
        .register_employee(current.auditor(), cor_id, req)
        .await?;
    let view = state.employees.get_employee_response(created.id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path((_cor_id, employee_id)): Path<(i64, i64)>,
) -> AppResult<Json<EmployeeResponse>> {
    Ok(Json(state.employees.get_employee_response(employee_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((cor_id, employee_id)): Path<(i64, i64)>,
    Json(req): Json<EmployeeUpdate>,
) -> AppResult<Json<EmployeeResponse>> {
    state
        .employees
        .update_employee(current.auditor(), cor_id, employee_id, req)
        .await?;
    Ok(Json(state.employees.get_employee_response(employee_id).await?))
}

pub async fn deactivate(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((cor_id, employee_id)): Path<(i64, i64)>,
) -> AppResult<Json<EmployeeResponse>> {
    state
        .employees
        .deactivate_employee(current.auditor(), cor_id, employee_id)
        .await?;
    Ok(Json(state.employees.get_employee_response(employee_id).await?))
}

pub async fn resend_join_code(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path((cor_id, employee_id)): Path<(i64, i64)>,
    Json(req): Json<EmployeeJoinCodeResend>,
) -> AppResult<ApiResponse<()>> {
    state
        .employees
        .resend_join_code(cor_id, employee_id, req)
        .await?;
    Ok(ApiResponse::ok())
}
