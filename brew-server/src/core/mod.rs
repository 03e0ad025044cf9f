//! Core module - server configuration, state and errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared services and record stores
//! - [`Server`] - HTTP server
//! - [`ServerError`] / [`ServiceError`] - error taxonomy

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError, ServiceError, ServiceResult};
pub use server::Server;
pub use state::ServerState;
