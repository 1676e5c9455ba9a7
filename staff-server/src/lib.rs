//! Staff Server - multi-tenant HR backend
//!
//! Corporations register employees by email invitation (join code), users
//! sign up, verify their email, log in with a session cookie and redeem the
//! join code to link their account to the waiting employee record.
//!
//! # Module structure
//!
//! ```text
//! staff-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── db/            # SQLite pool, audit hook, repositories
//! ├── email/         # mail transport + join/verification code mails
//! ├── auth/          # sessions, login success handler, password hashing
//! ├── services/      # employee, account and organization services
//! ├── api/           # axum routes and handlers
//! └── utils/         # logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod email;
pub mod error;
pub mod services;
pub mod utils;

pub use crate::core::{AppState, Config, Server};
pub use error::{ServiceError, ServiceResult};

/// Initialise logging from the loaded configuration
pub fn setup_environment(config: &Config) {
    utils::init_logger_with_file(&config.log_level, config.log_dir.as_deref());
}
