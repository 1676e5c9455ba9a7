//! Email Verification Repository
//!
//! One pending code per email. Codes are stored hashed.

use super::RepoResult;
use sqlx::{Executor, Sqlite};

#[derive(Debug, sqlx::FromRow)]
pub struct EmailVerification {
    pub email: String,
    pub code: String,
    pub attempts: i32,
    pub expires_at: i64,
    pub created_at: i64,
}

pub async fn upsert<'e, E>(
    executor: E,
    email: &str,
    code_hash: &str,
    expires_at: i64,
    now: i64,
) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO email_verifications (email, code, attempts, expires_at, created_at)
         VALUES (?1, ?2, 0, ?3, ?4)
         ON CONFLICT (email) DO UPDATE SET
            code = ?2, attempts = 0, expires_at = ?3, created_at = ?4",
    )
    .bind(email)
    .bind(code_hash)
    .bind(expires_at)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find<'e, E>(executor: E, email: &str) -> RepoResult<Option<EmailVerification>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, EmailVerification>(
        "SELECT * FROM email_verifications WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

/// Count one attempt against the pending code and return its hash.
///
/// Returns `None` once `max_attempts` have been used. The check and the
/// increment are one statement, so concurrent guesses cannot overrun it.
pub async fn claim_attempt<'e, E>(
    executor: E,
    email: &str,
    max_attempts: i32,
) -> RepoResult<Option<String>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let code: Option<(String,)> = sqlx::query_as(
        "UPDATE email_verifications SET attempts = attempts + 1
         WHERE email = ?1 AND attempts < ?2
         RETURNING code",
    )
    .bind(email)
    .bind(max_attempts)
    .fetch_optional(executor)
    .await?;
    Ok(code.map(|(hash,)| hash))
}

pub async fn delete<'e, E>(executor: E, email: &str) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM email_verifications WHERE email = ?")
        .bind(email)
        .execute(executor)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_upsert_resets_attempts() {
        let db = DbService::in_memory().await.unwrap();
        upsert(&db.pool, "a@example.com", "h1", 100, 1).await.unwrap();
        claim_attempt(&db.pool, "a@example.com", 3).await.unwrap();
        claim_attempt(&db.pool, "a@example.com", 3).await.unwrap();
        assert_eq!(find(&db.pool, "a@example.com").await.unwrap().unwrap().attempts, 2);

        upsert(&db.pool, "a@example.com", "h2", 200, 2).await.unwrap();
        let row = find(&db.pool, "a@example.com").await.unwrap().unwrap();
        assert_eq!(row.attempts, 0);
        assert_eq!(row.code, "h2");
        assert_eq!(row.expires_at, 200);

        delete(&db.pool, "a@example.com").await.unwrap();
        assert!(find(&db.pool, "a@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_claim_attempt_stops_at_limit() {
        let db = DbService::in_memory().await.unwrap();
        upsert(&db.pool, "a@example.com", "h1", 100, 1).await.unwrap();

        for _ in 0..3 {
            let hash = claim_attempt(&db.pool, "a@example.com", 3).await.unwrap();
            assert_eq!(hash.as_deref(), Some("h1"));
        }
        assert!(claim_attempt(&db.pool, "a@example.com", 3).await.unwrap().is_none());
        assert_eq!(find(&db.pool, "a@example.com").await.unwrap().unwrap().attempts, 3);
        assert!(claim_attempt(&db.pool, "b@example.com", 3).await.unwrap().is_none());
    }
}
