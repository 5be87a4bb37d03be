//! Identifier newtypes shared across the viewer.
//!
//! All identifiers are opaque strings minted by the remote services; the
//! viewer never interprets them beyond equality, with one exception: a view
//! identifier can carry the registry's "no view" sentinel and is therefore
//! checked for well-formedness before use.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a project in the remote registry.
    ProjectId
);

string_id!(
    /// Identifier of a model hosted under a project.
    ModelId
);

string_id!(
    /// Identifier of a saved view definition.
    ViewId
);

string_id!(
    /// Identifier of a single element inside a model.
    ElementId
);

/// Sentinel the registry uses to encode "no designated default view".
const INVALID_VIEW_ID: &str = "0";

impl ViewId {
    /// A designated default view id is only usable when it is non-empty and
    /// not the registry's invalid-id sentinel.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0 != INVALID_VIEW_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_id_well_formedness() {
        assert!(ViewId::from("0x20000000012").is_well_formed());
        assert!(!ViewId::from("0").is_well_formed());
        assert!(!ViewId::from("").is_well_formed());
    }

    #[test]
    fn ids_display_as_their_raw_value() {
        assert_eq!(ElementId::from("0x1a").to_string(), "0x1a");
        assert_eq!(ProjectId::new("p-1").as_str(), "p-1");
    }
}
