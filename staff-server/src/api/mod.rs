//! HTTP API routes

pub mod accounts;
pub mod auth;
pub mod corporations;
pub mod employees;
pub mod health;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::AppState;

/// Create the combined router
pub fn router(state: AppState) -> Router {
    let accounts = Router::new()
        .route("/api/accounts/signup", post(accounts::sign_up))
        .route("/api/accounts/verify-email", post(accounts::verify_email))
        .route("/api/accounts/resend-code", post(accounts::resend_code))
        .route("/api/employees/join", post(accounts::join_corporation));

    let session = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/api/me", get(auth::me));

    let corporations = Router::new()
        .route("/api/corporations", post(corporations::create))
        .route("/api/corporations/{cor_id}", get(corporations::get_by_id))
        .route(
            "/api/corporations/{cor_id}/positions",
            post(corporations::create_position).get(corporations::list_positions),
        )
        .route(
            "/api/corporations/{cor_id}/departments",
            post(corporations::create_department).get(corporations::list_departments),
        );

    let employees = Router::new()
        .route("/api/corporations/{cor_id}/employees", post(employees::register))
        .route(
            "/api/corporations/{cor_id}/employees/{employee_id}",
            get(employees::get_by_id).put(employees::update),
        )
        .route(
            "/api/corporations/{cor_id}/employees/{employee_id}/deactivate",
            post(employees::deactivate),
        )
        .route(
            "/api/corporations/{cor_id}/employees/{employee_id}/join-code",
            post(employees::resend_join_code),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(accounts)
        .merge(session)
        .merge(corporations)
        .merge(employees)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
