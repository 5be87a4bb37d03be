//! Saved view definitions.

use crate::ids::ViewId;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The kind of a saved view definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViewKind {
    /// 3D view over the model's spatial elements.
    Spatial,
    /// 2D view over a drawing sheet.
    Drawing,
}

/// A saved camera/visibility configuration over a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDefinitionSummary {
    pub id: ViewId,
    pub name: String,
    pub kind: ViewKind,
}
