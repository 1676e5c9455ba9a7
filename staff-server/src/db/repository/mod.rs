//! Repository Module
//!
//! One module of free functions per table. Every function is generic over the
//! sqlx executor so the same call runs against the pool or inside a
//! transaction (`&mut *tx`). Lookups return `Ok(None)` for a missing key; only
//! updates of a missing row report [`RepoError::NotFound`].

pub mod corporation;
pub mod department;
pub mod email_verification;
pub mod employee;
pub mod employee_info;
pub mod position;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{Auditor, DbService};
    use shared::models::{Corporation, Department, Position};

    /// Fresh migrated database with one corporation, position and department
    pub async fn seeded() -> (DbService, Corporation, Position, Department) {
        let db = DbService::in_memory().await.unwrap();
        let auditor = Auditor::system();
        let corp = super::corporation::insert(&db.pool, auditor, "Acme")
            .await
            .unwrap();
        let position = super::position::insert(&db.pool, auditor, corp.id, "Engineer")
            .await
            .unwrap();
        let department = super::department::insert(&db.pool, auditor, corp.id, "R&D")
            .await
            .unwrap();
        (db, corp, position, department)
    }
}
