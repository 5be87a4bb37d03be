//! Authentication state types.
//!
//! The identity provider is an external collaborator; the viewer only ever
//! observes a snapshot of its state and an explicit sign-in phase. The phase
//! is a three-state value rather than a loading flag so that an abandoned
//! sign-in round trip can be detected and timed out instead of leaving the
//! session stuck.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the identity provider's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    pub is_authorized: bool,
}

impl AuthSnapshot {
    pub fn authorized() -> Self {
        Self {
            is_authorized: true,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            is_authorized: false,
        }
    }
}

/// Where the interactive sign-in round trip currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignInPhase {
    /// No sign-in in progress.
    Idle,
    /// Interactive sign-in started, no auth notification received yet.
    Pending { since: DateTime<Utc> },
    /// At least one auth notification has settled the round trip.
    Settled,
}

impl SignInPhase {
    pub fn pending_at(since: DateTime<Utc>) -> Self {
        Self::Pending { since }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_in_flight_phase() {
        assert!(SignInPhase::pending_at(Utc::now()).is_pending());
        assert!(!SignInPhase::Idle.is_pending());
        assert!(!SignInPhase::Settled.is_pending());
    }
}
