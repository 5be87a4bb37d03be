//! Configuration service implementation.
//!
//! Loads the root configuration from the configuration file
//! (`~/.config/vantage/config.toml`) and caches it to avoid repeated file
//! I/O. A missing file is materialized with defaults on first access.

use crate::paths::VantagePaths;
use crate::storage::AtomicTomlFile;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use vantage_core::config::RootConfig;
use vantage_core::error::{Result, VantageError};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService backed by an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService at the platform default location.
    pub fn from_default_location() -> Result<Self> {
        let path = VantagePaths::config_file().map_err(|e| VantageError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let file: AtomicTomlFile<RootConfig> = AtomicTomlFile::new(self.path.clone());
        let loaded = file
            .load_or_init()
            .map_err(|e| VantageError::config(e.to_string()))?;

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_access_materializes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());

        let config = service.get_config().unwrap();
        assert_eq!(config, RootConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn edits_are_picked_up_after_cache_invalidation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());
        service.get_config().unwrap();

        std::fs::write(&path, "[registry]\nbase_url = \"http://localhost:9000\"\n").unwrap();
        // Cached copy still served until invalidated.
        assert_eq!(
            service.get_config().unwrap().registry.base_url,
            RootConfig::default().registry.base_url
        );

        service.invalidate_cache();
        assert_eq!(
            service.get_config().unwrap().registry.base_url,
            "http://localhost:9000"
        );
    }
}
