//! Authentication
//!
//! - [`session`] - in-process session store and cookie helpers
//! - [`extractor`] - `CurrentUser` extractor for protected handlers
//! - [`login`] - credential check and login success handler
//! - [`password`] - argon2 hashing

pub mod extractor;
pub mod login;
pub mod password;
pub mod session;

pub use extractor::CurrentUser;
pub use login::{LoginSuccess, LoginSuccessHandler};
pub use session::SessionStore;
