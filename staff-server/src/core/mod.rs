//! Core module: configuration, state and the HTTP server
//!
//! - [`Config`] - server configuration
//! - [`AppState`] - shared handler state
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, EmailTransport};
pub use server::Server;
pub use state::AppState;
