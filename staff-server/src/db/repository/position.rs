//! Position Repository

use super::RepoResult;
use crate::db::Auditor;
use shared::models::Position;
use shared::util::snowflake_id;
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Position>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Position>("SELECT * FROM position WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn find_by_corporation<'e, E>(executor: E, corporation_id: i64) -> RepoResult<Vec<Position>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Position>(
        "SELECT * FROM position WHERE corporation_id = ? ORDER BY name",
    )
    .bind(corporation_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn insert<'e, E>(
    executor: E,
    auditor: Auditor,
    corporation_id: i64,
    name: &str,
) -> RepoResult<Position>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    let row = sqlx::query_as::<_, Position>(
        "INSERT INTO position (id, corporation_id, name, created_at, updated_at, created_by, updated_by) \
         VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?5) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(corporation_id)
    .bind(name)
    .bind(stamp.at)
    .bind(stamp.by)
    .fetch_one(executor)
    .await?;
    Ok(row)
}
