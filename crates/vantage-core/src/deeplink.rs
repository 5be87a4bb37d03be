//! Deep-link parameter bag.
//!
//! A deep link is the launch URL of the viewer. Its query component can
//! pre-select a project and model by name and supply a set of element
//! identifiers to highlight once the first view opens. The query is parsed
//! exactly once at startup into an immutable bag; nothing re-parses it
//! later.

use crate::error::{Result, VantageError};
use crate::ids::ElementId;
use std::collections::HashMap;
use url::Url;

/// Query key selecting the project by name.
pub const PARAM_PROJECT_NAME: &str = "projectName";
/// Query key selecting the model by name.
pub const PARAM_MODEL_NAME: &str = "imodelName";
/// Query key carrying a space-separated list of element identifiers.
pub const PARAM_ELEMENT_IDS: &str = "elementIds";

/// Immutable mapping from query parameter name to value.
///
/// When a key occurs more than once in the query, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLinkParams {
    params: HashMap<String, String>,
}

impl DeepLinkParams {
    /// Parses the query component of a launch URL into a parameter bag.
    pub fn parse(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url)
            .map_err(|e| VantageError::invalid_deep_link(format!("{page_url}: {e}")))?;

        let mut params = HashMap::new();
        for (key, value) in url.query_pairs() {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self { params })
    }

    /// An empty bag, used when the viewer is launched without a deep link.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw access to a single parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn project_name(&self) -> Option<&str> {
        self.get(PARAM_PROJECT_NAME)
    }

    pub fn model_name(&self) -> Option<&str> {
        self.get(PARAM_MODEL_NAME)
    }

    /// The ordered element identifier list, split on single spaces.
    ///
    /// Identifier format is not validated; an absent or empty parameter
    /// yields an empty sequence.
    pub fn element_ids(&self) -> Vec<ElementId> {
        match self.get(PARAM_ELEMENT_IDS) {
            Some(raw) => raw
                .split(' ')
                .filter(|token| !token.is_empty())
                .map(ElementId::from)
                .collect(),
            None => Vec::new(),
        }
    }
}
