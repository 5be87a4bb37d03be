//! Unified path management for Vantage files.
//!
//! All viewer configuration and state live under the platform config
//! directory:
//!
//! ```text
//! ~/.config/vantage/           # Config directory
//! ├── config.toml              # Application configuration
//! └── viewer_state.toml        # Last opened project/model
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Vantage.
pub struct VantagePaths;

impl VantagePaths {
    /// Returns the Vantage configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("vantage"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Path of the application configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Path of the persisted viewer state file.
    pub fn state_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("viewer_state.toml"))
    }
}
