//! User Repository

use super::{RepoError, RepoResult};
use crate::db::Auditor;
use shared::models::{EmailAuthStatus, User};
use shared::util::snowflake_id;
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Emails are stored lowercased; callers normalise before the lookup
pub async fn find_by_email<'e, E>(executor: E, email: &str) -> RepoResult<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? LIMIT 1")
        .bind(email)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Insert a new account, not yet email-verified
pub async fn insert<'e, E>(
    executor: E,
    auditor: Auditor,
    name: &str,
    email: &str,
    password_hash: &str,
) -> RepoResult<User>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    let row = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, email, password_hash, email_auth_status, created_at, updated_at, created_by, updated_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7, ?7) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(EmailAuthStatus::NotVerified.as_db())
    .bind(stamp.at)
    .bind(stamp.by)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

pub async fn update_email_auth_status<'e, E>(
    executor: E,
    auditor: Auditor,
    id: i64,
    status: EmailAuthStatus,
) -> RepoResult<User>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    sqlx::query_as::<_, User>(
        "UPDATE users SET email_auth_status = ?1, updated_at = ?2, updated_by = ?3 WHERE id = ?4 RETURNING *",
    )
    .bind(status.as_db())
    .bind(stamp.at)
    .bind(stamp.by)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("user {id}")))
}
