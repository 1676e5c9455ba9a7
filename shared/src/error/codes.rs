//! Unified error codes
//!
//! This module defines all error codes returned by the staff server.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Account errors
//! - 4xxx: Corporation / organization errors
//! - 5xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Authenticated principal has no user record
    NoUserFound = 1008,

    // ==================== 3xxx: Account ====================
    /// User not found
    UserNotFound = 3001,
    /// Email already registered
    EmailAlreadyRegistered = 3002,
    /// Verification code expired
    VerificationCodeExpired = 3013,
    /// Verification code invalid
    VerificationCodeInvalid = 3014,
    /// Too many verification attempts
    TooManyAttempts = 3015,
    /// Email not verified
    EmailNotVerified = 3016,
    /// Password too short
    PasswordTooShort = 3018,
    /// Email delivery failed
    EmailDeliveryFailed = 3020,

    // ==================== 4xxx: Corporation ====================
    /// Corporation not found
    CorporationNotFound = 4001,
    /// Position not found
    PositionNotFound = 4101,
    /// Department not found
    DepartmentNotFound = 4201,

    // ==================== 5xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 5001,
    /// Employee info not found
    EmployeeInfoNotFound = 5002,
    /// Employee role is not a known role
    InvalidEmployeeRole = 5003,
    /// Join code does not match any employee
    JoinCodeInvalid = 5004,
    /// Employee is already linked to a user account
    EmployeeAlreadyJoined = 5005,
    /// Employee has been deactivated
    EmployeeInactive = 5006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::NoUserFound => "No user found for the authenticated principal",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailAlreadyRegistered => "Email already registered",
            ErrorCode::VerificationCodeExpired => "Verification code has expired",
            ErrorCode::VerificationCodeInvalid => "Invalid verification code",
            ErrorCode::TooManyAttempts => "Too many attempts",
            ErrorCode::EmailNotVerified => "Email not verified",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",
            ErrorCode::EmailDeliveryFailed => "Failed to send email",

            // Corporation
            ErrorCode::CorporationNotFound => "Corporation not found",
            ErrorCode::PositionNotFound => "Position not found",
            ErrorCode::DepartmentNotFound => "Department not found",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeInfoNotFound => "Employee info not found",
            ErrorCode::InvalidEmployeeRole => "Invalid employee role",
            ErrorCode::JoinCodeInvalid => "Invalid join code",
            ErrorCode::EmployeeAlreadyJoined => "Employee is already linked to an account",
            ErrorCode::EmployeeInactive => "Employee has been deactivated",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1008 => Ok(ErrorCode::NoUserFound),

            // Account
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyRegistered),
            3013 => Ok(ErrorCode::VerificationCodeExpired),
            3014 => Ok(ErrorCode::VerificationCodeInvalid),
            3015 => Ok(ErrorCode::TooManyAttempts),
            3016 => Ok(ErrorCode::EmailNotVerified),
            3018 => Ok(ErrorCode::PasswordTooShort),
            3020 => Ok(ErrorCode::EmailDeliveryFailed),

            // Corporation
            4001 => Ok(ErrorCode::CorporationNotFound),
            4101 => Ok(ErrorCode::PositionNotFound),
            4201 => Ok(ErrorCode::DepartmentNotFound),

            // Employee
            5001 => Ok(ErrorCode::EmployeeNotFound),
            5002 => Ok(ErrorCode::EmployeeInfoNotFound),
            5003 => Ok(ErrorCode::InvalidEmployeeRole),
            5004 => Ok(ErrorCode::JoinCodeInvalid),
            5005 => Ok(ErrorCode::EmployeeAlreadyJoined),
            5006 => Ok(ErrorCode::EmployeeInactive),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NoUserFound.code(), 1008);
        assert_eq!(ErrorCode::UserNotFound.code(), 3001);
        assert_eq!(ErrorCode::CorporationNotFound.code(), 4001);
        assert_eq!(ErrorCode::PositionNotFound.code(), 4101);
        assert_eq!(ErrorCode::DepartmentNotFound.code(), 4201);
        assert_eq!(ErrorCode::EmployeeNotFound.code(), 5001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_known_codes() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NoUserFound,
            ErrorCode::EmailNotVerified,
            ErrorCode::VerificationCodeInvalid,
            ErrorCode::DepartmentNotFound,
            ErrorCode::InvalidEmployeeRole,
            ErrorCode::EmployeeInactive,
            ErrorCode::DatabaseError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_unknown_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::EmployeeNotFound).unwrap();
        assert_eq!(json, "5001");
        let code: ErrorCode = serde_json::from_str("1008").unwrap();
        assert_eq!(code, ErrorCode::NoUserFound);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::PositionNotFound.to_string(), "4101");
    }
}
