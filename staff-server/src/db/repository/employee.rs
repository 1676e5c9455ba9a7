//! Employee Repository

use super::{RepoError, RepoResult};
use crate::db::Auditor;
use shared::models::{EmpRole, Employee, EmployeeStatus};
use shared::util::snowflake_id;
use sqlx::{Executor, Sqlite};

/// Values for a newly registered employee.
///
/// The row always starts in [`EmployeeStatus::Waiting`] with no linked user.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub role: EmpRole,
    pub corporation_id: i64,
    pub position_id: i64,
    pub department_id: i64,
    pub employee_info_id: i64,
}

/// Full-field replacement applied on edit
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    pub name: String,
    pub role: EmpRole,
    pub position_id: i64,
    pub department_id: i64,
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn find_by_info_id<'e, E>(executor: E, employee_info_id: i64) -> RepoResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Employee>("SELECT * FROM employee WHERE employee_info_id = ?")
        .bind(employee_info_id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Employees a user has joined as, across corporations
pub async fn find_by_user<'e, E>(executor: E, user_id: i64) -> RepoResult<Vec<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employee WHERE user_id = ? ORDER BY corporation_id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn insert<'e, E>(executor: E, auditor: Auditor, data: &NewEmployee) -> RepoResult<Employee>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    let row = sqlx::query_as::<_, Employee>(
        "INSERT INTO employee \
         (id, name, role, val, corporation_id, position_id, department_id, employee_info_id, user_id, \
          created_at, updated_at, created_by, updated_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL, ?9, ?9, ?10, ?10) RETURNING *",
    )
    .bind(snowflake_id())
    .bind(&data.name)
    .bind(data.role.as_str())
    .bind(EmployeeStatus::Waiting.as_db())
    .bind(data.corporation_id)
    .bind(data.position_id)
    .bind(data.department_id)
    .bind(data.employee_info_id)
    .bind(stamp.at)
    .bind(stamp.by)
    .fetch_one(executor)
    .await?;
    Ok(row)
}

pub async fn update<'e, E>(
    executor: E,
    auditor: Auditor,
    id: i64,
    data: &EmployeeChanges,
) -> RepoResult<Employee>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    sqlx::query_as::<_, Employee>(
        "UPDATE employee SET name = ?1, role = ?2, position_id = ?3, department_id = ?4, \
         updated_at = ?5, updated_by = ?6 WHERE id = ?7 RETURNING *",
    )
    .bind(&data.name)
    .bind(data.role.as_str())
    .bind(data.position_id)
    .bind(data.department_id)
    .bind(stamp.at)
    .bind(stamp.by)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("employee {id}")))
}

pub async fn update_status<'e, E>(
    executor: E,
    auditor: Auditor,
    id: i64,
    status: EmployeeStatus,
) -> RepoResult<Employee>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    sqlx::query_as::<_, Employee>(
        "UPDATE employee SET val = ?1, updated_at = ?2, updated_by = ?3 WHERE id = ?4 RETURNING *",
    )
    .bind(status.as_db())
    .bind(stamp.at)
    .bind(stamp.by)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("employee {id}")))
}

/// Link a user account and mark the employee as joined
pub async fn link_user<'e, E>(
    executor: E,
    auditor: Auditor,
    id: i64,
    user_id: i64,
) -> RepoResult<Employee>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stamp = auditor.stamp();
    sqlx::query_as::<_, Employee>(
        "UPDATE employee SET user_id = ?1, val = ?2, updated_at = ?3, updated_by = ?4 \
         WHERE id = ?5 RETURNING *",
    )
    .bind(user_id)
    .bind(EmployeeStatus::Joined.as_db())
    .bind(stamp.at)
    .bind(stamp.by)
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("employee {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{employee_info, test_support, user};
    use shared::models::EmployeeInfoCreate;
    use shared::util::parse_date;

    async fn info_row(pool: &sqlx::SqlitePool, code: &str) -> i64 {
        let data = EmployeeInfoCreate {
            join_date: parse_date("2024-01-15").unwrap(),
            free_date: parse_date("2024-01-15").unwrap(),
            major: None,
            cert: None,
            info: None,
            emp_no: None,
            email: "kim@example.com".into(),
            join_code: code.into(),
        };
        employee_info::insert(pool, Auditor::system(), &data)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_insert_starts_waiting_without_user() {
        let (db, corp, position, department) = test_support::seeded().await;
        let info_id = info_row(&db.pool, "CODE0001").await;

        let emp = insert(
            &db.pool,
            Auditor::for_user(1),
            &NewEmployee {
                name: "Kim".into(),
                role: EmpRole::General,
                corporation_id: corp.id,
                position_id: position.id,
                department_id: department.id,
                employee_info_id: info_id,
            },
        )
        .await
        .unwrap();

        assert_eq!(emp.val, EmployeeStatus::Waiting);
        assert_eq!(emp.role, EmpRole::General);
        assert_eq!(emp.user_id, None);
        assert_eq!(emp.audit.created_by(), Some(1));

        let by_info = find_by_info_id(&db.pool, info_id).await.unwrap().unwrap();
        assert_eq!(by_info.id, emp.id);
    }

    #[tokio::test]
    async fn test_status_and_link() {
        let (db, corp, position, department) = test_support::seeded().await;
        let info_id = info_row(&db.pool, "CODE0002").await;
        let emp = insert(
            &db.pool,
            Auditor::system(),
            &NewEmployee {
                name: "Park".into(),
                role: EmpRole::Admin,
                corporation_id: corp.id,
                position_id: position.id,
                department_id: department.id,
                employee_info_id: info_id,
            },
        )
        .await
        .unwrap();

        let account = user::insert(&db.pool, Auditor::system(), "Park", "park@example.com", "h")
            .await
            .unwrap();
        let linked = link_user(&db.pool, Auditor::for_user(account.id), emp.id, account.id)
            .await
            .unwrap();
        assert_eq!(linked.user_id, Some(account.id));
        assert_eq!(linked.val, EmployeeStatus::Joined);
        assert_eq!(find_by_user(&db.pool, account.id).await.unwrap().len(), 1);

        let inactive = update_status(&db.pool, Auditor::system(), emp.id, EmployeeStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(inactive.val, EmployeeStatus::Inactive);

        let missing = update_status(&db.pool, Auditor::system(), emp.id + 1, EmployeeStatus::Inactive)
            .await
            .unwrap_err();
        assert!(matches!(missing, RepoError::NotFound(_)));
    }
}
