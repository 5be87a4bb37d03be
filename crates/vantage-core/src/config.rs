//! Root configuration model.
//!
//! Loaded from `config.toml` in the platform config directory. Every field
//! has a default so a missing file yields a usable configuration that is
//! materialized on first run.

use serde::{Deserialize, Serialize};

/// Default interval after which an unanswered sign-in round trip is
/// abandoned.
pub const DEFAULT_SIGN_IN_TIMEOUT_SECS: u64 = 120;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RootConfig {
    pub registry: RegistryConfig,
    pub connection: ConnectionConfig,
    pub identity: IdentityConfig,
}

/// Endpoint of the project registry.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://registry.example.com/api/v1".to_string(),
        }
    }
}

/// Endpoint of the connection (briefcase) service.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    pub base_url: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://models.example.com/api/v1".to_string(),
        }
    }
}

/// Identity provider settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IdentityConfig {
    pub authority: String,
    pub client_id: String,
    /// URL the provider redirects back to after an interactive sign-in.
    /// Launching the viewer on this URL is treated as an in-progress
    /// round trip.
    pub redirect_url: String,
    pub sign_in_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            authority: "https://id.example.com".to_string(),
            client_id: "vantage-viewer".to_string(),
            redirect_url: "https://viewer.example.com/signin-callback".to_string(),
            sign_in_timeout_secs: DEFAULT_SIGN_IN_TIMEOUT_SECS,
        }
    }
}
