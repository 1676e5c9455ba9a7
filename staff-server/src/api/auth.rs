//! Login / logout handlers
//!
//! POST /login   - form login, 303 redirect with the session cookie
//! POST /logout  - drop the session, 303 redirect to `/`
//! GET  /api/me  - session user of the caller

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use shared::error::AppResult;
use shared::models::{LoginForm, SessionUser};

use crate::auth::CurrentUser;
use crate::auth::login::authenticate;
use crate::auth::session::{expired_session_cookie, session_cookie, session_id_from_cookie_header};
use crate::core::AppState;

fn see_other(location: &str, cookie: String) -> Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, cookie),
        ],
    )
        .into_response()
}

/// HTTPS is assumed everywhere but local development
fn secure_cookies(state: &AppState) -> bool {
    !state.config.is_development()
}

fn existing_session(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(session_id_from_cookie_header)
        .map(str::to_string)
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let principal = authenticate(&state.db.pool, &form).await?;
    let outcome = state
        .login_handler
        .on_authentication_success(&state.db.pool, &state.sessions, &principal)
        .await?;

    // A fresh id is issued on every login
    if let Some(previous) = existing_session(&headers) {
        state.sessions.invalidate(&previous);
    }

    Ok(see_other(
        &outcome.redirect_uri,
        session_cookie(&outcome.session_id, secure_cookies(&state)),
    ))
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(session_id) = existing_session(&headers)
        && state.sessions.invalidate(&session_id)
    {
        tracing::info!("Session closed");
    }
    see_other("/", expired_session_cookie(secure_cookies(&state)))
}

pub async fn me(current: CurrentUser) -> Json<SessionUser> {
    Json(current.user)
}
