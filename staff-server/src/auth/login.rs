//! Form login: credential check and the post-authentication step
//!
//! `authenticate` verifies the submitted email/password. The
//! [`LoginSuccessHandler`] then loads the account, stores the session
//! projection and picks the redirect target from the email verification flag.

use shared::error::{AppError, ErrorCode};
use shared::models::{EmailAuthStatus, LoginForm, SessionUser, User};
use sqlx::SqlitePool;

use super::password::verify_password;
use super::session::{SessionStore, USER_ATTRIBUTE};
use crate::db::repository::user;
use crate::error::{ServiceError, ServiceResult};

/// Verify credentials and return the authenticated principal (the email).
///
/// Unknown email and wrong password are reported identically.
pub async fn authenticate(pool: &SqlitePool, form: &LoginForm) -> ServiceResult<String> {
    let email = form.username.trim().to_lowercase();
    let Some(account) = user::find_by_email(pool, &email).await? else {
        tracing::info!(email = %email, "Login rejected: unknown email");
        return Err(AppError::invalid_credentials().into());
    };
    if !verify_password(&form.password, &account.password_hash) {
        tracing::info!(user_id = account.id, "Login rejected: wrong password");
        return Err(AppError::invalid_credentials().into());
    }
    Ok(account.email)
}

/// Where a completed login sends the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub session_id: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct LoginSuccessHandler {
    login_redirect_uri: String,
    unauthorized_uri: String,
}

impl LoginSuccessHandler {
    pub fn new(login_redirect_uri: impl Into<String>, unauthorized_uri: impl Into<String>) -> Self {
        Self {
            login_redirect_uri: login_redirect_uri.into(),
            unauthorized_uri: unauthorized_uri.into(),
        }
    }

    /// Runs after the credentials of `principal_email` were accepted.
    ///
    /// Fails with `NoUserFound` before any session is created when the account
    /// cannot be loaded.
    pub async fn on_authentication_success(
        &self,
        pool: &SqlitePool,
        sessions: &SessionStore,
        principal_email: &str,
    ) -> ServiceResult<LoginSuccess> {
        let account = user::find_by_email(pool, principal_email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %principal_email, "Authenticated principal has no user record");
                AppError::new(ErrorCode::NoUserFound)
            })?;

        let session_id = sessions.create();
        let projection = SessionUser::from(&account);
        sessions
            .set_attribute(&session_id, USER_ATTRIBUTE, &projection)
            .map_err(|e| ServiceError::Db(e.into()))?;

        let redirect_uri = self.redirect_for(&account).to_string();
        tracing::info!(user_id = account.id, redirect = %redirect_uri, "Login succeeded");
        Ok(LoginSuccess {
            session_id,
            redirect_uri,
        })
    }

    /// Only an explicit "not verified" flag diverts to the unauthorized page
    pub fn redirect_for(&self, account: &User) -> &str {
        if account.email_auth_status() == Some(EmailAuthStatus::NotVerified) {
            &self.unauthorized_uri
        } else {
            &self.login_redirect_uri
        }
    }
}
