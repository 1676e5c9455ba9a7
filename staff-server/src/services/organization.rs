//! Corporations and their positions and departments

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Corporation, CorporationCreate, Department, DepartmentCreate, Position, PositionCreate,
};
use sqlx::SqlitePool;

use crate::db::Auditor;
use crate::db::repository::{corporation, department, position};
use crate::error::ServiceResult;

#[derive(Clone)]
pub struct OrganizationService {
    pool: SqlitePool,
}

impl OrganizationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_corporation(
        &self,
        auditor: Auditor,
        data: CorporationCreate,
    ) -> ServiceResult<Corporation> {
        let name = required_name(&data.name)?;
        let created = corporation::insert(&self.pool, auditor, name).await?;
        tracing::info!(corporation_id = created.id, "Corporation created");
        Ok(created)
    }

    pub async fn get_corporation(&self, corporation_id: i64) -> ServiceResult<Corporation> {
        let found = corporation::find_by_id(&self.pool, corporation_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::CorporationNotFound, corporation_id))?;
        Ok(found)
    }

    pub async fn create_position(
        &self,
        auditor: Auditor,
        corporation_id: i64,
        data: PositionCreate,
    ) -> ServiceResult<Position> {
        let name = required_name(&data.name)?;
        self.get_corporation(corporation_id).await?;
        Ok(position::insert(&self.pool, auditor, corporation_id, name).await?)
    }

    pub async fn list_positions(&self, corporation_id: i64) -> ServiceResult<Vec<Position>> {
        self.get_corporation(corporation_id).await?;
        Ok(position::find_by_corporation(&self.pool, corporation_id).await?)
    }

    pub async fn create_department(
        &self,
        auditor: Auditor,
        corporation_id: i64,
        data: DepartmentCreate,
    ) -> ServiceResult<Department> {
        let name = required_name(&data.name)?;
        self.get_corporation(corporation_id).await?;
        Ok(department::insert(&self.pool, auditor, corporation_id, name).await?)
    }

    pub async fn list_departments(&self, corporation_id: i64) -> ServiceResult<Vec<Department>> {
        self.get_corporation(corporation_id).await?;
        Ok(department::find_by_corporation(&self.pool, corporation_id).await?)
    }
}

fn required_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name must not be empty").with_detail("field", "name"));
    }
    Ok(name)
}
