//! Viewer state repository implementation.
//!
//! Persists the last opened project/model names so the open-model form can
//! be prefilled on the next launch. State is cached in memory and written
//! through on every save.

use crate::paths::VantagePaths;
use crate::storage::AtomicTomlFile;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use vantage_core::error::{Result, VantageError};
use vantage_core::state::{StateRepository, ViewerState};

/// TOML-file-backed [`StateRepository`].
#[derive(Clone)]
pub struct TomlStateRepository {
    /// Cached viewer state.
    state: Arc<Mutex<ViewerState>>,
    file: Arc<AtomicTomlFile<ViewerState>>,
}

impl TomlStateRepository {
    /// Creates a repository backed by an explicit file path, loading the
    /// current state (or the default when the file does not exist yet).
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = AtomicTomlFile::new(path);
        let state = file
            .load()
            .map_err(|e| VantageError::storage(e.to_string()))?
            .unwrap_or_default();

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            file: Arc::new(file),
        })
    }

    /// Creates a repository at the platform default location.
    pub fn from_default_location() -> Result<Self> {
        let path = VantagePaths::state_file().map_err(|e| VantageError::storage(e.to_string()))?;
        Self::new(path)
    }
}

#[async_trait::async_trait]
impl StateRepository for TomlStateRepository {
    async fn load(&self) -> Result<ViewerState> {
        Ok(self.state.lock().await.clone())
    }

    async fn save(&self, state: &ViewerState) -> Result<()> {
        self.file
            .save(state)
            .map_err(|e| VantageError::storage(e.to_string()))?;
        *self.state.lock().await = state.clone();
        Ok(())
    }
}
