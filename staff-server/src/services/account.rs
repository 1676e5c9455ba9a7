//! User accounts: sign up, email verification and join-code redemption

use shared::error::{AppError, ErrorCode};
use shared::models::{
    EmailAuthStatus, Employee, EmployeeStatus, ResendCodeRequest, User, UserSignup,
    VerifyEmailRequest,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::password::{MIN_PASSWORD_LEN, hash_password, verify_password};
use crate::db::Auditor;
use crate::db::repository::{email_verification, employee, employee_info, user};
use crate::email::EmailService;
use crate::error::{ServiceError, ServiceResult};

/// Verification code lifetime
pub const CODE_TTL_MS: i64 = 5 * 60 * 1000;
/// Guesses allowed per code
pub const MAX_CODE_ATTEMPTS: i32 = 3;

#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    email: EmailService,
}

impl AccountService {
    pub fn new(pool: SqlitePool, email: EmailService) -> Self {
        Self { pool, email }
    }

    /// Create an unverified account and mail its verification code
    pub async fn sign_up(&self, data: UserSignup) -> ServiceResult<User> {
        let email = normalize_email(&data.email)?;
        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty").into());
        }
        if data.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::new(ErrorCode::PasswordTooShort).into());
        }
        if user::find_by_email(&self.pool, &email).await?.is_some() {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).into());
        }

        let password_hash = hash_password(&data.password).map_err(|e| {
            tracing::error!(error = %e, "Password hash error");
            AppError::internal("Internal error")
        })?;

        let mut tx = self.pool.begin().await?;
        let created = user::insert(&mut *tx, Auditor::system(), name, &email, &password_hash)
            .await
            .map_err(|e| match ServiceError::from(e) {
                ServiceError::App(err) if err.code == ErrorCode::AlreadyExists => {
                    ServiceError::App(AppError::new(ErrorCode::EmailAlreadyRegistered))
                }
                other => other,
            })?;
        let code = self.issue_code(&mut tx, &email).await?;
        self.deliver_code(&email, &code).await?;
        tx.commit().await?;

        tracing::info!(user_id = created.id, "User signed up");
        Ok(created)
    }

    /// Check a verification code and mark the account verified
    pub async fn verify_email(&self, data: VerifyEmailRequest) -> ServiceResult<User> {
        let email = normalize_email(&data.email)?;
        let pending = email_verification::find(&self.pool, &email)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::VerificationCodeInvalid))?;

        if now_millis() > pending.expires_at {
            email_verification::delete(&self.pool, &email).await?;
            return Err(AppError::new(ErrorCode::VerificationCodeExpired).into());
        }
        let code_hash = email_verification::claim_attempt(&self.pool, &email, MAX_CODE_ATTEMPTS)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::TooManyAttempts))?;
        if !verify_password(data.code.trim(), &code_hash) {
            tracing::info!(email = %email, "Wrong verification code");
            return Err(AppError::new(ErrorCode::VerificationCodeInvalid).into());
        }

        let account = user::find_by_email(&self.pool, &email)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

        let mut tx = self.pool.begin().await?;
        let verified = user::update_email_auth_status(
            &mut *tx,
            Auditor::for_user(account.id),
            account.id,
            EmailAuthStatus::Verified,
        )
        .await?;
        email_verification::delete(&mut *tx, &email).await?;
        tx.commit().await?;

        tracing::info!(user_id = verified.id, "Email verified");
        Ok(verified)
    }

    /// Replace the pending code of an unverified account with a fresh one
    pub async fn resend_verification_code(&self, data: ResendCodeRequest) -> ServiceResult<()> {
        let email = normalize_email(&data.email)?;
        let account = user::find_by_email(&self.pool, &email)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
        if account.is_email_verified() {
            return Err(AppError::invalid_request("Email already verified").into());
        }

        let mut tx = self.pool.begin().await?;
        let code = self.issue_code(&mut tx, &email).await?;
        self.deliver_code(&email, &code).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Redeem a join code: link the user to the waiting employee record
    pub async fn join_corporation(&self, user_id: i64, join_code: &str) -> ServiceResult<Employee> {
        let mut tx = self.pool.begin().await?;

        let account = user::find_by_id(&mut *tx, user_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::UserNotFound, user_id))?;
        if !account.is_email_verified() {
            return Err(AppError::new(ErrorCode::EmailNotVerified).into());
        }

        let join_code = join_code.trim().to_ascii_uppercase();
        let info = employee_info::find_by_join_code(&mut *tx, &join_code)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::JoinCodeInvalid))?;
        let invited = employee::find_by_info_id(&mut *tx, info.id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::JoinCodeInvalid))?;

        if invited.val == EmployeeStatus::Inactive {
            return Err(AppError::new(ErrorCode::EmployeeInactive).into());
        }
        if invited.user_id.is_some() {
            return Err(AppError::new(ErrorCode::EmployeeAlreadyJoined).into());
        }

        let joined =
            employee::link_user(&mut *tx, Auditor::for_user(user_id), invited.id, user_id).await?;
        tx.commit().await?;

        tracing::info!(
            user_id,
            employee_id = joined.id,
            corporation_id = joined.corporation_id,
            "Join code redeemed"
        );
        Ok(joined)
    }

    /// Store a fresh hashed code for `email` and return the plain code
    async fn issue_code(
        &self,
        tx: &mut sqlx::Transaction<'static, sqlx::Sqlite>,
        email: &str,
    ) -> ServiceResult<String> {
        let code = self.email.create_verification_code();
        let code_hash = hash_password(&code).map_err(|e| {
            tracing::error!(error = %e, "Code hash error");
            AppError::internal("Internal error")
        })?;
        let now = now_millis();
        email_verification::upsert(&mut **tx, email, &code_hash, now + CODE_TTL_MS, now).await?;
        Ok(code)
    }

    async fn deliver_code(&self, email: &str, code: &str) -> ServiceResult<()> {
        self.email
            .send_verification_code(email, code)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Verification code delivery failed");
                AppError::new(ErrorCode::EmailDeliveryFailed)
            })?;
        Ok(())
    }
}

fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Invalid email"));
    }
    Ok(email)
}
