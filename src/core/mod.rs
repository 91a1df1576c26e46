//! Core Module - infrastructure components of the application
//!
//! - authentication (JWT) and current-member resolution
//! - configuration
//! - error handling
//! - application state

pub mod auth;
pub mod config;
pub mod error;
pub mod state;

// Re-exports
pub use auth::{Claims, authentication_middleware, decode_jwt, encode_jwt};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
