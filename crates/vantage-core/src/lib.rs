pub mod auth;
pub mod config;
pub mod deeplink;
pub mod error;
pub mod ids;
pub mod project;
pub mod services;
pub mod session;
pub mod state;
pub mod view;

// Re-export common error type
pub use error::{Result, VantageError};
