//! Employee Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Audit;

/// Role of an employee inside its corporation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmpRole {
    /// Corporation owner
    Super,
    /// Corporation administrator
    Admin,
    /// Regular employee
    General,
}

/// Role string that does not name an [`EmpRole`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown employee role: {0}")]
pub struct InvalidRole(pub String);

impl EmpRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Super => "SUPER",
            Self::Admin => "ADMIN",
            Self::General => "GENERAL",
        }
    }
}

impl FromStr for EmpRole {
    type Err = InvalidRole;

    /// Exact, case-sensitive match on the stored name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER" => Ok(Self::Super),
            "ADMIN" => Ok(Self::Admin),
            "GENERAL" => Ok(Self::General),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for EmpRole {
    type Error = InvalidRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EmpRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee validation status (`val` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Registered, join code not yet redeemed
    #[serde(rename = "W")]
    Waiting,
    /// Join code redeemed, linked to a user account
    #[serde(rename = "T")]
    Joined,
    /// Deactivated
    #[serde(rename = "F")]
    Inactive,
}

/// Status marker that does not name an [`EmployeeStatus`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown employee status: {0}")]
pub struct InvalidStatus(pub String);

impl EmployeeStatus {
    pub const fn as_db(&self) -> &'static str {
        match self {
            Self::Waiting => "W",
            Self::Joined => "T",
            Self::Inactive => "F",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "W" => Some(Self::Waiting),
            "T" => Some(Self::Joined),
            "F" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl TryFrom<String> for EmployeeStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_db(&value).ok_or(InvalidStatus(value))
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub role: EmpRole,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub val: EmployeeStatus,
    pub corporation_id: i64,
    pub position_id: i64,
    pub department_id: i64,
    pub employee_info_id: i64,
    /// Linked account, set when the join code is redeemed
    pub user_id: Option<i64>,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub audit: Audit,
}

/// Register employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    /// Role name, parsed into [`EmpRole`] by the service
    pub role: String,
    pub position_id: i64,
    pub department_id: i64,
    #[serde(with = "crate::util::serde_date")]
    pub join_date: NaiveDateTime,
    /// Defaults to `join_date` when absent
    #[serde(default, with = "crate::util::serde_date::option")]
    pub free_date: Option<NaiveDateTime>,
    pub major: Option<String>,
    pub cert: Option<String>,
    pub info: Option<String>,
    pub emp_no: Option<String>,
    pub email: String,
}

/// Update employee payload (full replacement of the editable fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: String,
    pub role: String,
    pub position_id: i64,
    pub department_id: i64,
    #[serde(with = "crate::util::serde_date")]
    pub join_date: NaiveDateTime,
    #[serde(default, with = "crate::util::serde_date::option")]
    pub free_date: Option<NaiveDateTime>,
    pub major: Option<String>,
    pub cert: Option<String>,
    pub info: Option<String>,
    pub emp_no: Option<String>,
}

/// Resend join code payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeJoinCodeResend {
    pub email: String,
}

/// Redeem join code payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinCorporationRequest {
    pub join_code: String,
}

/// Employee read view (Employee joined with EmployeeInfo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub corporation_id: i64,
    pub position_id: i64,
    pub department_id: i64,
    /// `yyyy-MM-dd`
    pub join_date: String,
    /// `yyyy-MM-dd`
    pub free_date: String,
    pub emp_no: Option<String>,
    pub major: Option<String>,
    pub cert: Option<String>,
    pub info: Option<String>,
    pub val: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!("ADMIN".parse::<EmpRole>(), Ok(EmpRole::Admin));
        assert_eq!("GENERAL".parse::<EmpRole>(), Ok(EmpRole::General));
        assert_eq!(
            "admin".parse::<EmpRole>(),
            Err(InvalidRole("admin".to_string()))
        );
        assert!("".parse::<EmpRole>().is_err());
    }

    #[test]
    fn test_status_db_codes() {
        assert_eq!(EmployeeStatus::Waiting.as_db(), "W");
        assert_eq!(EmployeeStatus::from_db("F"), Some(EmployeeStatus::Inactive));
        assert_eq!(EmployeeStatus::from_db("X"), None);
        assert!(EmployeeStatus::try_from("Q".to_string()).is_err());
    }

    #[test]
    fn test_create_payload_dates() {
        let json = r#"{
            "name": "Kim",
            "role": "GENERAL",
            "position_id": 1,
            "department_id": 2,
            "join_date": "2024-01-15",
            "major": null,
            "cert": null,
            "info": null,
            "emp_no": "E-1",
            "email": "kim@example.com"
        }"#;
        let data: EmployeeCreate = serde_json::from_str(json).unwrap();
        assert_eq!(crate::util::format_date(&data.join_date), "2024-01-15");
        assert!(data.free_date.is_none());
    }
}
