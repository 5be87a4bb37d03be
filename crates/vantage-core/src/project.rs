//! Registry-side domain models.

use crate::ids::{ModelId, ProjectId};
use serde::{Deserialize, Serialize};

/// A named container grouping one or more models in the remote registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

/// Summary of a model hosted under a project, as returned by the
/// model-hosting service. Order of summaries is server-defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub id: ModelId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
