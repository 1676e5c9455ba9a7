//! Business services
//!
//! Services own a pool handle and orchestrate repository calls; handlers stay
//! thin and only translate HTTP in and out.

pub mod account;
pub mod employee;
pub mod organization;

pub use account::AccountService;
pub use employee::EmployeeService;
pub use organization::OrganizationService;
