//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DATABASE_PATH | staff.db | SQLite file |
//! | HTTP_PORT | 8080 | HTTP listen port |
//! | ENVIRONMENT | development | development / staging / production |
//! | LOG_LEVEL | info | fallback when RUST_LOG is unset |
//! | LOG_DIR | (none) | daily rolling log files |
//! | EMAIL_TRANSPORT | log | `ses` or `log` |
//! | SES_FROM_EMAIL | | sender address, required outside development |
//! | SES_REGION | (sdk default) | SES region override |
//! | LOGIN_REDIRECT_URI | / | redirect after login |
//! | USER_UNAUTHORIZED_URI | /account/unauthorized | redirect for unverified accounts |
//! | SESSION_TTL_SECS | 1800 | session idle timeout |

use std::time::Duration;

use crate::error::BoxError;

/// Mail delivery backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTransport {
    Ses,
    Log,
}

impl EmailTransport {
    fn parse(raw: &str) -> Result<Self, BoxError> {
        match raw.to_ascii_lowercase().as_str() {
            "ses" => Ok(Self::Ses),
            "log" => Ok(Self::Log),
            other => Err(format!("EMAIL_TRANSPORT must be 'ses' or 'log', got '{other}'").into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    /// Directory for rolling log files, stdout only when unset
    pub log_dir: Option<String>,
    pub email_transport: EmailTransport,
    /// SES sender email address
    pub ses_from_email: String,
    pub ses_region: Option<String>,
    /// Redirect target after a successful login
    pub login_redirect_uri: String,
    /// Redirect target after login with an unverified email
    pub user_unauthorized_uri: String,
    /// Idle timeout of a login session
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "staff.db".into(),
            http_port: 8080,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            email_transport: EmailTransport::Log,
            ses_from_email: "noreply@localhost".into(),
            ses_region: None,
            login_redirect_uri: "/".into(),
            user_unauthorized_uri: "/account/unauthorized".into(),
            session_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    /// Require a variable that must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str, dev_default: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                dev_default.to_string()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let email_transport = match std::env::var("EMAIL_TRANSPORT") {
            Ok(raw) => EmailTransport::parse(&raw)?,
            Err(_) if environment == "development" => EmailTransport::Log,
            Err(_) => EmailTransport::Ses,
        };

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            email_transport,
            ses_from_email: Self::require_secret(
                "SES_FROM_EMAIL",
                &environment,
                &defaults.ses_from_email,
            )?,
            ses_region: std::env::var("SES_REGION").ok().filter(|s| !s.is_empty()),
            login_redirect_uri: std::env::var("LOGIN_REDIRECT_URI")
                .unwrap_or(defaults.login_redirect_uri),
            user_unauthorized_uri: std::env::var("USER_UNAUTHORIZED_URI")
                .unwrap_or(defaults.user_unauthorized_uri),
            session_ttl: std::env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_parse() {
        assert_eq!(EmailTransport::parse("SES").unwrap(), EmailTransport::Ses);
        assert_eq!(EmailTransport::parse("log").unwrap(), EmailTransport::Log);
        assert!(EmailTransport::parse("smtp").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.is_development());
        assert_eq!(config.login_redirect_uri, "/");
        assert_eq!(config.user_unauthorized_uri, "/account/unauthorized");
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
    }
}
