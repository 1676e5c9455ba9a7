//! Position Model

use serde::{Deserialize, Serialize};

use super::Audit;

/// Job position inside a corporation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Position {
    pub id: i64,
    pub corporation_id: i64,
    pub name: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub audit: Audit,
}

/// Create position payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionCreate {
    pub name: String,
}
