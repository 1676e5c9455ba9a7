//! Corporation, position and department handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use shared::error::AppResult;
use shared::models::{
    Corporation, CorporationCreate, Department, DepartmentCreate, Position, PositionCreate,
};

use crate::auth::CurrentUser;
use crate::core::AppState;

pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<CorporationCreate>,
) -> AppResult<(StatusCode, Json<Corporation>)> {
    let created = state
        .organizations
        .create_corporation(current.auditor(), req)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(cor_id): Path<i64>,
) -> AppResult<Json<Corporation>> {
    Ok(Json(state.organizations.get_corporation(cor_id).await?))
}

pub async fn create_position(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(cor_id): Path<i64>,
    Json(req): Json<PositionCreate>,
) -> AppResult<(StatusCode, Json<Position>)> {
    let created = state
        .organizations
        .create_position(current.auditor(), cor_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_positions(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(cor_id): Path<i64>,
) -> AppResult<Json<Vec<Position>>> {
    Ok(Json(state.organizations.list_positions(cor_id).await?))
}

pub async fn create_department(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(cor_id): Path<i64>,
    Json(req): Json<DepartmentCreate>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let created = state
        .organizations
        .create_department(current.auditor(), cor_id, req)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_departments(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(cor_id): Path<i64>,
) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(state.organizations.list_departments(cor_id).await?))
}
