//! Employee Info Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Audit;

/// Extended profile of an employee, created before the employee row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeInfo {
    pub id: i64,
    #[serde(with = "crate::util::serde_date")]
    pub join_date: NaiveDateTime,
    /// Scheduled exit date
    #[serde(with = "crate::util::serde_date")]
    pub free_date: NaiveDateTime,
    pub major: Option<String>,
    pub cert: Option<String>,
    pub info: Option<String>,
    pub emp_no: Option<String>,
    pub email: String,
    /// One-time invitation code
    #[serde(skip_serializing)]
    pub join_code: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub audit: Audit,
}

/// Values for a new info row
#[derive(Debug, Clone)]
pub struct EmployeeInfoCreate {
    pub join_date: NaiveDateTime,
    pub free_date: NaiveDateTime,
    pub major: Option<String>,
    pub cert: Option<String>,
    pub info: Option<String>,
    pub emp_no: Option<String>,
    pub email: String,
    pub join_code: String,
}

/// Replacement values applied to an existing info row.
///
/// `email` and `join_code` are not part of the replacement.
#[derive(Debug, Clone)]
pub struct EmployeeInfoUpdate {
    pub join_date: NaiveDateTime,
    pub free_date: NaiveDateTime,
    pub major: Option<String>,
    pub cert: Option<String>,
    pub info: Option<String>,
    pub emp_no: Option<String>,
}
