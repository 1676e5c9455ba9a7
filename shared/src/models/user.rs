//! User Model

use serde::{Deserialize, Serialize};

use super::Audit;

/// Email verification flag stored on a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailAuthStatus {
    #[serde(rename = "T")]
    Verified,
    #[serde(rename = "F")]
    NotVerified,
}

impl EmailAuthStatus {
    pub const fn as_db(&self) -> &'static str {
        match self {
            Self::Verified => "T",
            Self::NotVerified => "F",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "T" => Some(Self::Verified),
            "F" => Some(Self::NotVerified),
            _ => None,
        }
    }
}

/// Login account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Raw flag as stored; see [`User::email_auth_status`]
    pub email_auth_status: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub audit: Audit,
}

impl User {
    /// Parsed verification flag, `None` for unknown markers
    pub fn email_auth_status(&self) -> Option<EmailAuthStatus> {
        EmailAuthStatus::from_db(&self.email_auth_status)
    }

    pub fn is_email_verified(&self) -> bool {
        self.email_auth_status() == Some(EmailAuthStatus::Verified)
    }
}

/// Sign up payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignup {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Verify email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Resend verification code payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendCodeRequest {
    pub email: String,
}

/// Form login payload (`username` carries the email)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
