//! Corporation Model

use serde::{Deserialize, Serialize};

use super::Audit;

/// Corporation entity (tenant root)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Corporation {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub audit: Audit,
}

/// Create corporation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporationCreate {
    pub name: String,
}
