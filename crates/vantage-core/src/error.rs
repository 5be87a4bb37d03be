//! Error types for the Vantage viewer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Vantage application.
///
/// Every failure surfaced by the locator, the session controller, or the
/// infrastructure clients is expressed as one of these variants. All of them
/// are terminal for the operation that produced them; nothing in this
/// application retries automatically.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VantageError {
    /// A required deep-link parameter was absent.
    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// The deep-link URL could not be parsed at all.
    #[error("Invalid deep link: {message}")]
    InvalidDeepLink { message: String },

    /// The registry has no project of the requested name.
    #[error("Project not found: '{name}'")]
    ProjectNotFound { name: String },

    /// The project exists but hosts no model of the requested name.
    #[error("Model not found: '{name}'")]
    ModelNotFound { name: String },

    /// Opening the read-only connection failed. The message carries the
    /// underlying transport/auth error verbatim.
    #[error("Failed to open connection: {message}")]
    OpenConnection { message: String },

    /// The model has no designated default view and no spatial or drawing
    /// view definitions.
    #[error("Model '{model}' has no usable view definition")]
    NoViewDefinition { model: String },

    /// A second open attempt was issued while one was already pending.
    #[error("A model open attempt is already in flight")]
    OpenInFlight,

    /// The identity provider never reported back within the configured
    /// sign-in interval.
    #[error("Sign-in timed out waiting for the identity provider")]
    SignInTimeout,

    /// The owning component was torn down while the operation was in
    /// flight; its completion effects were suppressed.
    #[error("Operation cancelled")]
    Cancelled,

    /// Network/transport error outside of the open-connection path.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence error (viewer state, config file)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VantageError {
    /// Creates a MissingParameter error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates an InvalidDeepLink error.
    pub fn invalid_deep_link(message: impl Into<String>) -> Self {
        Self::InvalidDeepLink {
            message: message.into(),
        }
    }

    /// Creates a ProjectNotFound error.
    pub fn project_not_found(name: impl Into<String>) -> Self {
        Self::ProjectNotFound { name: name.into() }
    }

    /// Creates a ModelNotFound error.
    pub fn model_not_found(name: impl Into<String>) -> Self {
        Self::ModelNotFound { name: name.into() }
    }

    /// Creates an OpenConnection error.
    pub fn open_connection(message: impl Into<String>) -> Self {
        Self::OpenConnection {
            message: message.into(),
        }
    }

    /// Creates a NoViewDefinition error.
    pub fn no_view_definition(model: impl Into<String>) -> Self {
        Self::NoViewDefinition {
            model: model.into(),
        }
    }

    /// Creates a Transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error means a named entity could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProjectNotFound { .. } | Self::ModelNotFound { .. }
        )
    }

    /// Returns true if the failure belongs to the model-open pipeline and
    /// rolls the session back to the no-model-open screen.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. }
                | Self::ProjectNotFound { .. }
                | Self::ModelNotFound { .. }
                | Self::OpenConnection { .. }
                | Self::NoViewDefinition { .. }
        )
    }
}

/// Convenient result alias used across all Vantage crates.
pub type Result<T> = std::result::Result<T, VantageError>;
