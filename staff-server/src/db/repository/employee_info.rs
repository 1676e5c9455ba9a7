//! Employee Info Repository

use super::{RepoError, RepoResult};
use crate::db::Auditor;
use shared::models::{EmployeeInfo, EmployeeInfoCreate, EmployeeInfoUpdate};
use shared::util::snowflake_id;
use sqlx::{Executor, Sqlite};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<EmployeeInfo>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, EmployeeInfo>("SELECT * FROM employee_info WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn find_by_join_code<'e, E>(executor: E, join_code: &str) -> RepoResult<Option<EmployeeInfo>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, EmployeeInfo>(
        "SELECT * FROM employee_info WHERE join_code = ? LIMIT 1",
    )
    .bind(join_code)
    .fetch_optional(executor)
    .await?;
    Ok(row)
}

pub async fn insert<'e, E>(
    executor: E,
    auditor: Auditor,
    data: &EmployeeInfoCreate,
) -> RepoResult<EmployeeInfo>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    let row = sqlx::query_as::<_, EmployeeInfo>(
        "INSERT INTO employee_info \
         (id, join_date, free_date, major, cert, info, emp_no, email, join_code, created_at, updated_at, created_by, updated_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10, ?11, ?11) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(data.join_date)
    .bind(data.free_date)
    .bind(&data.major)
    .bind(&data.cert)
    .bind(&data.info)
    .bind(&data.emp_no)
    .bind(&data.email)
    .bind(&data.join_code)
    .bind(stamp.at)
    .bind(stamp.by)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

/// Replace the profile fields of an existing row in place
pub async fn update<'e, E>(
    executor: E,
    auditor: Auditor,
    id: i64,
    data: &EmployeeInfoUpdate,
) -> RepoResult<EmployeeInfo>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    sqlx::query_as::<_, EmployeeInfo>(
        "UPDATE employee_info SET \
         join_date = ?1, free_date = ?2, major = ?3, cert = ?4, info = ?5, emp_no = ?6, \
         updated_at = ?7, updated_by = ?8 \
         WHERE id = ?9 RETURNING *",
    )
    .bind(data.join_date)
    .bind(data.free_date)
    .bind(&data.major)
    .bind(&data.cert)
    .bind(&data.info)
    .bind(&data.emp_no)
    .bind(stamp.at)
    .bind(stamp.by)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("employee_info {id}")))
}
