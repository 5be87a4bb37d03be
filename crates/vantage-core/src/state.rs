//! Persisted viewer state.
//!
//! Viewer-level state that survives restarts: the names of the last project
//! and model the user opened, used to prefill the open-model form when no
//! deep link supplies names.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Viewer state that persists across restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    /// Name of the last project the user opened a model from.
    pub last_project_name: Option<String>,
    /// Name of the last model the user opened.
    pub last_model_name: Option<String>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the last opened selection.
    pub fn set_last_selection(
        &mut self,
        project_name: impl Into<String>,
        model_name: impl Into<String>,
    ) {
        self.last_project_name = Some(project_name.into());
        self.last_model_name = Some(model_name.into());
    }

    /// Returns the last opened (project, model) pair when both are known.
    pub fn last_selection(&self) -> Option<(&str, &str)> {
        match (&self.last_project_name, &self.last_model_name) {
            (Some(project), Some(model)) => Some((project.as_str(), model.as_str())),
            _ => None,
        }
    }
}

/// Storage backend for [`ViewerState`].
#[async_trait::async_trait]
pub trait StateRepository: Send + Sync {
    async fn load(&self) -> Result<ViewerState>;

    async fn save(&self, state: &ViewerState) -> Result<()>;
}
