//! Gallery API Library
//!
//! This crate provides the HTTP handlers, the publisher auth gate, the response
//! envelope and application setup.

mod handlers;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{HttpAppError, ResponseBody};
pub use state::AppState;
