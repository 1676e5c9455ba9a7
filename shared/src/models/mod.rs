//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`
//! and embed [`Audit`] for creation/modification bookkeeping.
//! All IDs are snowflake `i64`.

pub mod audit;
pub mod corporation;
pub mod department;
pub mod employee;
pub mod employee_info;
pub mod position;
pub mod session;
pub mod user;

// Re-exports
pub use audit::*;
pub use corporation::*;
pub use department::*;
pub use employee::*;
pub use employee_info::*;
pub use position::*;
pub use session::*;
pub use user::*;
