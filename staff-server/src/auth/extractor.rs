//! Session extractor
//!
//! Resolves the `SESSION` cookie to the [`SessionUser`] stored at login.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;
use shared::models::SessionUser;

use super::session::{USER_ATTRIBUTE, session_id_from_cookie_header};
use crate::core::AppState;
use crate::db::Auditor;

/// Logged-in user of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session_id: String,
    pub user: SessionUser,
}

impl CurrentUser {
    /// Audit actor for writes made by this user
    pub fn auditor(&self) -> Auditor {
        Auditor::for_user(self.user.id)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(current.clone());
        }

        let session_id = parts
            .headers
            .get_all(http::header::COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .find_map(session_id_from_cookie_header)
            .map(str::to_string)
            .ok_or_else(|| {
                tracing::debug!(uri = %parts.uri, "Request without session cookie");
                AppError::not_authenticated()
            })?;

        let user: SessionUser = state
            .sessions
            .get_attribute(&session_id, USER_ATTRIBUTE)
            .ok_or_else(|| {
                tracing::debug!(uri = %parts.uri, "Unknown or expired session");
                AppError::not_authenticated()
            })?;

        let current = CurrentUser { session_id, user };
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}
