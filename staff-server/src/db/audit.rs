//! Audit hook for repository writes
//!
//! Entities embed [`shared::models::Audit`], whose fields are read-only to
//! application code. Repository insert/update functions take an [`Auditor`]
//! and are the only writers of the audit columns.

use shared::util::now_millis;

/// Actor performing a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Auditor {
    actor: Option<i64>,
}

/// Values for the audit columns of one write
#[derive(Debug, Clone, Copy)]
pub struct AuditStamp {
    pub at: i64,
    pub by: Option<i64>,
}

impl Auditor {
    /// Writes not attributable to a user (bootstrap, sign up)
    pub const fn system() -> Self {
        Self { actor: None }
    }

    /// Writes performed on behalf of a logged-in user
    pub const fn for_user(user_id: i64) -> Self {
        Self {
            actor: Some(user_id),
        }
    }

    pub fn actor(&self) -> Option<i64> {
        self.actor
    }

    /// Stamp for the current instant
    pub fn stamp(&self) -> AuditStamp {
        AuditStamp {
            at: now_millis(),
            by: self.actor,
        }
    }
}
