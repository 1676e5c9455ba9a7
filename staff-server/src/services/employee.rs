//! Employee lifecycle
//!
//! Register, edit, deactivate, read and re-invite employees of a corporation.
//! Each mutating operation runs in one SQLite transaction; an error at any
//! step drops the transaction and rolls back every write made before it.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    EmpRole, Employee, EmployeeCreate, EmployeeInfo, EmployeeInfoCreate, EmployeeInfoUpdate,
    EmployeeJoinCodeResend, EmployeeResponse, EmployeeStatus, EmployeeUpdate,
};
use shared::util::format_date;
use sqlx::SqlitePool;

use crate::db::Auditor;
use crate::db::repository::employee::{EmployeeChanges, NewEmployee};
use crate::db::repository::{corporation, department, employee, employee_info, position};
use crate::email::EmailService;
use crate::error::ServiceResult;

#[derive(Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
    email: EmailService,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool, email: EmailService) -> Self {
        Self { pool, email }
    }

    /// Create the info record, mail the join code, then create the employee.
    ///
    /// The employee starts as `W` with no linked user.
    pub async fn register_employee(
        &self,
        auditor: Auditor,
        corporation_id: i64,
        data: EmployeeCreate,
    ) -> ServiceResult<Employee> {
        let mut tx = self.pool.begin().await?;

        let join_code = self.email.create_join_code();
        let info = employee_info::insert(
            &mut *tx,
            auditor,
            &EmployeeInfoCreate {
                join_date: data.join_date,
                free_date: data.free_date.unwrap_or(data.join_date),
                major: data.major,
                cert: data.cert,
                info: data.info,
                emp_no: data.emp_no,
                email: data.email.trim().to_string(),
                join_code,
            },
        )
        .await?;

        self.email
            .send_join_code(&info.email, &info.join_code)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, corporation_id, "Join code delivery failed");
                AppError::new(ErrorCode::EmailDeliveryFailed)
            })?;

        let role = parse_role(&data.role)?;
        let corporation = corporation::find_by_id(&mut *tx, corporation_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::CorporationNotFound, corporation_id))?;
        let position = position::find_by_id(&mut *tx, data.position_id)
            .await?
            .filter(|p| p.corporation_id == corporation.id)
            .ok_or_else(|| AppError::not_found_id(ErrorCode::PositionNotFound, data.position_id))?;
        let department = department::find_by_id(&mut *tx, data.department_id)
            .await?
            .filter(|d| d.corporation_id == corporation.id)
            .ok_or_else(|| {
                AppError::not_found_id(ErrorCode::DepartmentNotFound, data.department_id)
            })?;

        let employee = employee::insert(
            &mut *tx,
            auditor,
            &NewEmployee {
                name: data.name,
                role,
                corporation_id: corporation.id,
                position_id: position.id,
                department_id: department.id,
                employee_info_id: info.id,
            },
        )
        .await?;

        tx.commit().await?;
        tracing::info!(employee_id = employee.id, corporation_id, "Employee registered");
        Ok(employee)
    }

    /// Replace the editable fields of an employee and its info record.
    ///
    /// Position and department must belong to the employee's corporation.
    pub async fn update_employee(
        &self,
        auditor: Auditor,
        corporation_id: i64,
        employee_id: i64,
        data: EmployeeUpdate,
    ) -> ServiceResult<Employee> {
        let mut tx = self.pool.begin().await?;

        let existing = employee::find_by_id(&mut *tx, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::EmployeeNotFound, employee_id))?;
        warn_on_foreign_corporation(&existing, corporation_id);

        let info = employee_info::find_by_id(&mut *tx, existing.employee_info_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found_id(ErrorCode::EmployeeInfoNotFound, existing.employee_info_id)
            })?;
        let replacement = EmployeeInfoUpdate {
            join_date: data.join_date,
            free_date: data.free_date.unwrap_or(data.join_date),
            major: data.major,
            cert: data.cert,
            info: data.info,
            emp_no: data.emp_no,
        };
        employee_info::update(&mut *tx, auditor, info.id, &replacement).await?;

        let role = parse_role(&data.role)?;
        let position = position::find_by_id(&mut *tx, data.position_id)
            .await?
            .filter(|p| p.corporation_id == existing.corporation_id)
            .ok_or_else(|| AppError::not_found_id(ErrorCode::PositionNotFound, data.position_id))?;
        let department = department::find_by_id(&mut *tx, data.department_id)
            .await?
            .filter(|d| d.corporation_id == existing.corporation_id)
            .ok_or_else(|| {
                AppError::not_found_id(ErrorCode::DepartmentNotFound, data.department_id)
            })?;

        let updated = employee::update(
            &mut *tx,
            auditor,
            existing.id,
            &EmployeeChanges {
                name: data.name,
                role,
                position_id: position.id,
                department_id: department.id,
            },
        )
        .await?;

        tx.commit().await?;
        tracing::info!(employee_id, corporation_id, "Employee updated");
        Ok(updated)
    }

    /// Mark the employee inactive. Already inactive employees are accepted.
    pub async fn deactivate_employee(
        &self,
        auditor: Auditor,
        corporation_id: i64,
        employee_id: i64,
    ) -> ServiceResult<Employee> {
        let mut tx = self.pool.begin().await?;

        let existing = employee::find_by_id(&mut *tx, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::EmployeeNotFound, employee_id))?;
        warn_on_foreign_corporation(&existing, corporation_id);
        if existing.val == EmployeeStatus::Inactive {
            tracing::debug!(employee_id, "Employee already inactive");
        }

        let updated =
            employee::update_status(&mut *tx, auditor, existing.id, EmployeeStatus::Inactive)
                .await?;

        tx.commit().await?;
        tracing::info!(employee_id, corporation_id, "Employee deactivated");
        Ok(updated)
    }

    pub async fn find_employee_by_id(&self, employee_id: i64) -> ServiceResult<Employee> {
        let found = employee::find_by_id(&self.pool, employee_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::EmployeeNotFound, employee_id))?;
        Ok(found)
    }

    pub async fn find_employee_info_by_id(&self, info_id: i64) -> ServiceResult<EmployeeInfo> {
        let found = employee_info::find_by_id(&self.pool, info_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::EmployeeInfoNotFound, info_id))?;
        Ok(found)
    }

    /// Read view joining the employee with its info record
    pub async fn get_employee_response(&self, employee_id: i64) -> ServiceResult<EmployeeResponse> {
        let found = self.find_employee_by_id(employee_id).await?;
        let info = self.find_employee_info_by_id(found.employee_info_id).await?;
        Ok(to_response(&found, &info))
    }

    /// Mail the stored join code to `data.email`.
    ///
    /// The code is not regenerated and the stored contact email is kept.
    pub async fn resend_join_code(
        &self,
        corporation_id: i64,
        employee_id: i64,
        data: EmployeeJoinCodeResend,
    ) -> ServiceResult<()> {
        let found = self.find_employee_by_id(employee_id).await?;
        warn_on_foreign_corporation(&found, corporation_id);
        let info = self.find_employee_info_by_id(found.employee_info_id).await?;

        self.email
            .send_join_code(data.email.trim(), &info.join_code)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, employee_id, "Join code delivery failed");
                AppError::new(ErrorCode::EmailDeliveryFailed)
            })?;
        Ok(())
    }
}

fn parse_role(raw: &str) -> Result<EmpRole, AppError> {
    raw.parse::<EmpRole>().map_err(|e| {
        AppError::with_message(ErrorCode::InvalidEmployeeRole, e.to_string()).with_detail("role", raw)
    })
}

// TODO: reject instead of warn once callers are checked for corporation membership
fn warn_on_foreign_corporation(found: &Employee, corporation_id: i64) {
    if found.corporation_id != corporation_id {
        tracing::warn!(
            employee_id = found.id,
            employee_corporation = found.corporation_id,
            requested_corporation = corporation_id,
            "Employee accessed through a different corporation"
        );
    }
}

fn to_response(found: &Employee, info: &EmployeeInfo) -> EmployeeResponse {
    EmployeeResponse {
        id: found.id,
        name: found.name.clone(),
        role: found.role.to_string(),
        corporation_id: found.corporation_id,
        position_id: found.position_id,
        department_id: found.department_id,
        join_date: format_date(&info.join_date),
        free_date: format_date(&info.free_date),
        emp_no: info.emp_no.clone(),
        major: info.major.clone(),
        cert: info.cert.clone(),
        info: info.info.clone(),
        val: found.val.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::test_support;
    use crate::email::testing::RecordingMailer;
    use shared::models::{Corporation, Department, Position};
    use shared::util::parse_date;
    use std::sync::Arc;

    struct Fixture {
        db: DbService,
        mailer: Arc<RecordingMailer>,
        service: EmployeeService,
        corp: Corporation,
        position: Position,
        department: Department,
    }

    async fn fixture_with(mailer: RecordingMailer) -> Fixture {
        let (db, corp, position, department) = test_support::seeded().await;
        let mailer = Arc::new(mailer);
        let service = EmployeeService::new(db.pool.clone(), EmailService::new(mailer.clone()));
        Fixture {
            db,
            mailer,
            service,
            corp,
            position,
            department,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(RecordingMailer::default()).await
    }

    fn create_payload(f: &Fixture) -> EmployeeCreate {
        EmployeeCreate {
            name: "Kim".into(),
            role: "GENERAL".into(),
            position_id: f.position.id,
            department_id: f.department.id,
            join_date: parse_date("2024-01-15T17:45:00").unwrap(),
            free_date: None,
            major: Some("CS".into()),
            cert: None,
            info: None,
            emp_no: Some("E-100".into()),
            email: "kim@example.com".into(),
        }
    }

    fn update_payload(f: &Fixture) -> EmployeeUpdate {
        EmployeeUpdate {
            name: "Kim Minji".into(),
            role: "ADMIN".into(),
            position_id: f.position.id,
            department_id: f.department.id,
            join_date: parse_date("2024-03-01").unwrap(),
            free_date: parse_date("2025-03-01"),
            major: None,
            cert: Some("CPA".into()),
            info: Some("transferred".into()),
            emp_no: Some("E-200".into()),
        }
    }

    async fn counts(pool: &SqlitePool) -> (i64, i64) {
        let (infos,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employee_info")
            .fetch_one(pool)
            .await
            .unwrap();
        let (employees,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employee")
            .fetch_one(pool)
            .await
            .unwrap();
        (infos, employees)
    }

    #[tokio::test]
    async fn test_register_creates_one_info_and_one_waiting_employee() {
        let f = fixture().await;
        let emp = f
            .service
            .register_employee(Auditor::for_user(9), f.corp.id, create_payload(&f))
            .await
            .unwrap();

        assert_eq!(counts(&f.db.pool).await, (1, 1));
        assert_eq!(emp.val, EmployeeStatus::Waiting);
        assert_eq!(emp.user_id, None);
        assert_eq!(emp.corporation_id, f.corp.id);
        assert_eq!(emp.audit.created_by(), Some(9));

        let info = f.service.find_employee_info_by_id(emp.employee_info_id).await.unwrap();
        assert_eq!(info.free_date, info.join_date);
        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "kim@example.com");
        assert!(sent[0].body.contains(&info.join_code));
    }

    #[tokio::test]
    async fn test_positions_and_departments_of_other_corporations_are_rejected() {
        let f = fixture().await;
        let other = corporation::insert(&f.db.pool, Auditor::system(), "Globex")
            .await
            .unwrap();
        let foreign_position = position::insert(&f.db.pool, Auditor::system(), other.id, "Clerk")
            .await
            .unwrap();
        let foreign_department =
            department::insert(&f.db.pool, Auditor::system(), other.id, "Sales")
                .await
                .unwrap();

        let mut data = create_payload(&f);
        data.position_id = foreign_position.id;
        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id, data)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PositionNotFound);

        let mut data = create_payload(&f);
        data.department_id = foreign_department.id;
        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id, data)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DepartmentNotFound);
        assert_eq!(counts(&f.db.pool).await, (0, 0));

        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap();
        let mut change = update_payload(&f);
        change.position_id = foreign_position.id;
        let err = f
            .service
            .update_employee(Auditor::system(), f.corp.id, emp.id, change)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PositionNotFound);

        let unchanged = f.service.find_employee_by_id(emp.id).await.unwrap();
        assert_eq!(unchanged.position_id, f.position.id);
        assert_eq!(unchanged.name, "Kim");
    }

    #[tokio::test]
    async fn test_register_with_missing_position_commits_nothing() {
        let f = fixture().await;
        let mut data = create_payload(&f);
        data.position_id = f.position.id + 1;

        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id, data)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::PositionNotFound);
        assert_eq!(counts(&f.db.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_register_with_missing_corporation_or_department() {
        let f = fixture().await;
        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id + 1, create_payload(&f))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CorporationNotFound);

        let mut data = create_payload(&f);
        data.department_id = 1;
        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id, data)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DepartmentNotFound);
        assert_eq!(counts(&f.db.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let f = fixture().await;
        let mut data = create_payload(&f);
        data.role = "general".into();

        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id, data)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidEmployeeRole);
        assert_eq!(counts(&f.db.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_register_mail_failure_rolls_back() {
        let f = fixture_with(RecordingMailer::failing()).await;
        let err = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmailDeliveryFailed);
        assert_eq!(counts(&f.db.pool).await, (0, 0));
    }

    #[tokio::test]
    async fn test_update_replaces_info_in_place() {
        let f = fixture().await;
        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap();
        let before = f.service.find_employee_info_by_id(emp.employee_info_id).await.unwrap();

        let updated = f
            .service
            .update_employee(Auditor::for_user(3), f.corp.id, emp.id, update_payload(&f))
            .await
            .unwrap();
        assert_eq!(updated.name, "Kim Minji");
        assert_eq!(updated.role, EmpRole::Admin);
        assert_eq!(updated.employee_info_id, emp.employee_info_id);
        assert_eq!(updated.audit.updated_by(), Some(3));
        assert_eq!(updated.audit.created_by(), None);

        let after = f.service.find_employee_info_by_id(emp.employee_info_id).await.unwrap();
        assert_eq!(after.join_code, before.join_code);
        assert_eq!(after.email, before.email);
        assert_eq!(after.cert.as_deref(), Some("CPA"));
        assert_eq!(after.major, None);
        assert_eq!(counts(&f.db.pool).await, (1, 1));
    }

    #[tokio::test]
    async fn test_update_missing_employee_changes_nothing() {
        let f = fixture().await;
        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap();

        let err = f
            .service
            .update_employee(Auditor::system(), f.corp.id, emp.id + 1, update_payload(&f))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeNotFound);

        let unchanged = f.service.get_employee_response(emp.id).await.unwrap();
        assert_eq!(unchanged.name, "Kim");
        assert_eq!(unchanged.emp_no.as_deref(), Some("E-100"));
    }

    #[tokio::test]
    async fn test_update_with_missing_department_rolls_back_info() {
        let f = fixture().await;
        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap();

        let mut data = update_payload(&f);
        data.department_id = f.department.id + 1;
        let err = f
            .service
            .update_employee(Auditor::system(), f.corp.id, emp.id, data)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DepartmentNotFound);

        let info = f.service.find_employee_info_by_id(emp.employee_info_id).await.unwrap();
        assert_eq!(info.emp_no.as_deref(), Some("E-100"));
        assert_eq!(info.cert, None);
    }

    #[tokio::test]
    async fn test_deactivate_twice() {
        let f = fixture().await;
        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap();

        let first = f
            .service
            .deactivate_employee(Auditor::system(), f.corp.id, emp.id)
            .await
            .unwrap();
        let second = f
            .service
            .deactivate_employee(Auditor::system(), f.corp.id, emp.id)
            .await
            .unwrap();
        assert_eq!(first.val, EmployeeStatus::Inactive);
        assert_eq!(second.val, EmployeeStatus::Inactive);
        assert_eq!(
            f.service.find_employee_by_id(emp.id).await.unwrap().val,
            EmployeeStatus::Inactive
        );

        let err = f
            .service
            .deactivate_employee(Auditor::system(), f.corp.id, emp.id + 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeNotFound);
    }

    #[tokio::test]
    async fn test_response_formats_dates() {
        let f = fixture().await;
        let mut data = create_payload(&f);
        data.join_date = parse_date("2024-01-15T23:59:59").unwrap();
        data.free_date = parse_date("2024-12-31T08:00:00");
        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, data)
            .await
            .unwrap();

        let view = f.service.get_employee_response(emp.id).await.unwrap();
        assert_eq!(view.join_date, "2024-01-15");
        assert_eq!(view.free_date, "2024-12-31");
        assert_eq!(view.role, "GENERAL");
        assert_eq!(view.val, "W");

        let err = f.service.get_employee_response(emp.id + 1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeNotFound);
        let err = f.service.find_employee_info_by_id(1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmployeeInfoNotFound);
    }

    #[tokio::test]
    async fn test_resend_uses_stored_code() {
        let f = fixture().await;
        let emp = f
            .service
            .register_employee(Auditor::system(), f.corp.id, create_payload(&f))
            .await
            .unwrap();
        let info = f.service.find_employee_info_by_id(emp.employee_info_id).await.unwrap();

        f.service
            .resend_join_code(
                f.corp.id,
                emp.id,
                EmployeeJoinCodeResend {
                    email: "kim.minji@example.com".into(),
                },
            )
            .await
            .unwrap();

        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].to, "kim.minji@example.com");
        assert!(sent[1].body.contains(&info.join_code));

        let after = f.service.find_employee_info_by_id(emp.employee_info_id).await.unwrap();
        assert_eq!(after.join_code, info.join_code);
        assert_eq!(after.email, "kim@example.com");
    }
}
