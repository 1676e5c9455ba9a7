//! Corporation Repository

use super::RepoResult;
use crate::db::Auditor;
use shared::models::Corporation;
use shared::util::snowflake_id;
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Corporation>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Corporation>("SELECT * FROM corporation WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn insert<'e, E>(executor: E, auditor: Auditor, name: &str) -> RepoResult<Corporation>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    let row = sqlx::query_as::<_, Corporation>(
        "INSERT INTO corporation (id, name, created_at, updated_at, created_by, updated_by) \
         VALUES (?1, ?2, ?3, ?3, ?4, ?4) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(name)
    .bind(stamp.at)
    .bind(stamp.by)
    .fetch_one(executor)
    .await?;
    Ok(row)
}
