//! Session domain model.
//!
//! [`SessionState`] is the single value the session controller owns. The
//! screen shown to the user is always derived from it, never stored
//! separately, so the four screens cannot drift out of sync with the data.

use crate::auth::{AuthSnapshot, SignInPhase};
use crate::ids::ViewId;
use crate::services::ModelConnection;
use std::sync::Arc;
use strum_macros::Display;

/// An open model together with its resolved default view.
///
/// Coupling both in one value enforces the invariant that a default view id
/// never exists without an open connection and vice versa: both are set
/// together on success and dropped together on failure or close.
#[derive(Clone)]
pub struct OpenModel {
    pub connection: Arc<dyn ModelConnection>,
    pub view_id: ViewId,
}

/// The four screens the viewer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Screen {
    /// Interactive sign-in round trip in progress.
    SigningIn,
    /// Not signed in; shows the sign-in prompt.
    Unauthenticated,
    /// Signed in, no model open; shows the open-model form.
    NoModelOpen,
    /// Terminal operating state: viewport plus toolbar.
    ModelOpen,
}

/// State owned exclusively by the session controller.
#[derive(Clone)]
pub struct SessionState {
    pub sign_in: SignInPhase,
    pub is_authorized: bool,
    pub open: Option<OpenModel>,
    /// True when the viewer was launched on the configured sign-in redirect
    /// URL. Treated as a transient in-round-trip signal until the first
    /// auth notification settles the phase.
    at_sign_in_redirect: bool,
}

impl SessionState {
    pub fn new(is_authorized: bool, at_sign_in_redirect: bool) -> Self {
        Self {
            sign_in: SignInPhase::Idle,
            is_authorized,
            open: None,
            at_sign_in_redirect,
        }
    }

    /// Applies an auth-state notification. This is the only path that moves
    /// a pending sign-in phase forward. The caller is responsible for
    /// closing any open connection when authorization is lost.
    pub fn settle_auth(&mut self, snapshot: AuthSnapshot) {
        self.sign_in = SignInPhase::Settled;
        self.is_authorized = snapshot.is_authorized;
        self.at_sign_in_redirect = false;
    }

    /// Sets connection and default view together.
    pub fn set_open(&mut self, open: OpenModel) {
        self.open = Some(open);
    }

    /// Clears connection and default view together.
    pub fn clear_open(&mut self) {
        self.open = None;
    }

    /// Derives the screen to show from the current state.
    pub fn screen(&self) -> Screen {
        let settled = self.sign_in == SignInPhase::Settled;
        if self.sign_in.is_pending() || (self.at_sign_in_redirect && !settled) {
            Screen::SigningIn
        } else if !self.is_authorized {
            Screen::Unauthenticated
        } else if self.open.is_none() {
            Screen::NoModelOpen
        } else {
            Screen::ModelOpen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn starts_on_the_sign_in_prompt_when_unauthorized() {
        let state = SessionState::new(false, false);
        assert_eq!(state.screen(), Screen::Unauthenticated);
    }

    #[test]
    fn a_pending_sign_in_shows_the_signing_in_screen() {
        let mut state = SessionState::new(false, false);
        state.sign_in = SignInPhase::pending_at(Utc::now());
        assert_eq!(state.screen(), Screen::SigningIn);
    }

    #[test]
    fn launching_on_the_redirect_url_counts_as_signing_in() {
        let state = SessionState::new(false, true);
        assert_eq!(state.screen(), Screen::SigningIn);
    }

    #[test]
    fn a_failed_sign_in_settles_back_to_the_prompt() {
        let mut state = SessionState::new(false, true);
        state.sign_in = SignInPhase::pending_at(Utc::now());
        state.settle_auth(AuthSnapshot::unauthorized());
        assert_eq!(state.sign_in, SignInPhase::Settled);
        assert_eq!(state.screen(), Screen::Unauthenticated);
    }

    #[test]
    fn a_successful_sign_in_lands_on_the_open_model_form() {
        let mut state = SessionState::new(false, false);
        state.sign_in = SignInPhase::pending_at(Utc::now());
        state.settle_auth(AuthSnapshot::authorized());
        assert_eq!(state.screen(), Screen::NoModelOpen);
    }
}
