//! Session controller.
//!
//! Owns the [`SessionState`] and drives every transition between the four
//! screens: starting and settling the interactive sign-in, opening a model
//! through the locator, resolving its default view, and closing/resetting.
//! All boundary services are constructor-injected; the controller is the
//! only writer of the session state.

use crate::locator::ModelLocator;
use chrono::Utc;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vantage_core::auth::{AuthSnapshot, SignInPhase};
use vantage_core::error::{Result, VantageError};
use vantage_core::ids::ViewId;
use vantage_core::services::{IdentityProvider, ModelConnection};
use vantage_core::session::{OpenModel, Screen, SessionState};
use vantage_core::state::StateRepository;
use vantage_core::view::ViewKind;

/// Construction-time knobs for the controller.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How long a pending sign-in waits for an auth notification before it
    /// is abandoned.
    pub sign_in_timeout: Duration,
    /// True when the viewer was launched on the identity provider's
    /// sign-in redirect URL.
    pub launched_at_redirect: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            sign_in_timeout: Duration::from_secs(
                vantage_core::config::DEFAULT_SIGN_IN_TIMEOUT_SECS,
            ),
            launched_at_redirect: false,
        }
    }
}

/// The root of the viewer's behavior: a state machine over
/// `SigningIn → Unauthenticated → NoModelOpen → ModelOpen`.
pub struct SessionController {
    identity: Arc<dyn IdentityProvider>,
    locator: ModelLocator,
    state_repository: Arc<dyn StateRepository>,
    state: RwLock<SessionState>,
    /// Token of the model-open attempt currently in flight, if any. A
    /// second attempt is rejected while this is occupied.
    in_flight: StdMutex<Option<Uuid>>,
    cancel: CancellationToken,
    sign_in_timeout: Duration,
}

impl SessionController {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        locator: ModelLocator,
        state_repository: Arc<dyn StateRepository>,
        options: SessionOptions,
    ) -> Self {
        let state = SessionState::new(identity.is_authorized(), options.launched_at_redirect);
        Self {
            identity,
            locator,
            state_repository,
            state: RwLock::new(state),
            in_flight: StdMutex::new(None),
            cancel: CancellationToken::new(),
            sign_in_timeout: options.sign_in_timeout,
        }
    }

    /// The screen the UI should currently show.
    pub async fn screen(&self) -> Screen {
        self.state.read().await.screen()
    }

    /// A snapshot of the session state (cheap: the connection handle is
    /// shared, not duplicated).
    pub async fn current_state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Cancels all in-flight work owned by this controller. Completion
    /// handlers of cancelled work never run.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Subscribes to the identity provider's notification stream for the
    /// lifetime of the controller. Registered once at mount; the
    /// subscription ends when [`SessionController::shutdown`] runs.
    pub fn spawn_auth_listener(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let controller = Arc::clone(self);
        let cancel = self.cancel.clone();
        let mut rx = self.identity.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => match changed {
                        Ok(()) => {
                            let snapshot = *rx.borrow_and_update();
                            controller.apply_auth_notification(snapshot).await;
                        }
                        Err(_) => break,
                    },
                }
            }
        })
    }

    /// Applies an auth-state notification: settles any pending sign-in and
    /// copies the provider's authorization verdict. Losing authorization
    /// closes the open model.
    pub async fn apply_auth_notification(&self, snapshot: AuthSnapshot) {
        let open = {
            let mut state = self.state.write().await;
            state.settle_auth(snapshot);
            if snapshot.is_authorized {
                None
            } else {
                state.open.take()
            }
        };

        if let Some(open) = open {
            close_quietly(open.connection.as_ref()).await;
        }
        tracing::debug!(authorized = snapshot.is_authorized, "auth state settled");
    }

    /// Starts the interactive sign-in round trip and waits for it to
    /// settle. If the identity provider never reports back within the
    /// configured interval, the phase returns to idle and the attempt
    /// fails with `SignInTimeout`.
    pub async fn start_sign_in(&self) -> Result<()> {
        let mut rx = self.identity.subscribe();
        {
            let mut state = self.state.write().await;
            if state.sign_in.is_pending() {
                return Ok(());
            }
            state.sign_in = SignInPhase::pending_at(Utc::now());
        }

        // Fire-and-forget: the notification stream is the only feedback
        // path that settles the phase.
        if let Err(e) = self.identity.sign_in().await {
            tracing::warn!(error = %e, "interactive sign-in reported an error");
        }

        let settled = tokio::select! {
            _ = self.cancel.cancelled() => return Err(VantageError::Cancelled),
            result = tokio::time::timeout(self.sign_in_timeout, rx.changed()) => result,
        };

        match settled {
            Ok(Ok(())) => {
                let snapshot = *rx.borrow_and_update();
                self.apply_auth_notification(snapshot).await;
                Ok(())
            }
            Ok(Err(_)) => {
                self.state.write().await.sign_in = SignInPhase::Idle;
                Err(VantageError::internal(
                    "identity provider dropped its notification stream",
                ))
            }
            Err(_) => {
                self.state.write().await.sign_in = SignInPhase::Idle;
                Err(VantageError::SignInTimeout)
            }
        }
    }

    /// Signs out: closes any open model, then delegates to the provider.
    /// The resulting notification clears the authorization.
    pub async fn sign_out(&self) -> Result<()> {
        self.close_model().await?;
        self.identity.sign_out().await
    }

    /// Opens the named model and resolves its default view. On success the
    /// session gains connection and view id together and the last
    /// selection is persisted; on failure at any stage the session is
    /// rolled back to the no-model-open screen with the handle closed.
    pub async fn open_model(
        &self,
        project_name: Option<&str>,
        model_name: Option<&str>,
    ) -> Result<()> {
        let attempt = Uuid::new_v4();
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            if in_flight.is_some() {
                return Err(VantageError::OpenInFlight);
            }
            *in_flight = Some(attempt);
        }

        let result = tokio::select! {
            _ = self.cancel.cancelled() => Err(VantageError::Cancelled),
            result = self.run_open(project_name, model_name) => result,
        };

        *self.in_flight.lock().unwrap() = None;
        result
    }

    async fn run_open(&self, project_name: Option<&str>, model_name: Option<&str>) -> Result<()> {
        let resolved = self.locator.resolve(project_name, model_name).await?;
        let connection = self.locator.open(&resolved).await?;

        match resolve_default_view(connection.as_ref()).await {
            Ok(view_id) => {
                {
                    let mut state = self.state.write().await;
                    state.set_open(OpenModel {
                        connection,
                        view_id,
                    });
                }
                self.persist_last_selection(&resolved.project_name, &resolved.model_name)
                    .await;
                tracing::info!(
                    project = %resolved.project_name,
                    model = %resolved.model_name,
                    "model opened"
                );
                Ok(())
            }
            Err(e) => {
                close_quietly(connection.as_ref()).await;
                self.state.write().await.clear_open();
                Err(e)
            }
        }
    }

    /// Closes the open model, clearing connection and view id together.
    pub async fn close_model(&self) -> Result<()> {
        let open = self.state.write().await.open.take();
        if let Some(open) = open {
            open.connection.close().await?;
            tracing::info!("model closed");
        }
        Ok(())
    }

    async fn persist_last_selection(&self, project_name: &str, model_name: &str) {
        let mut viewer_state = self.state_repository.load().await.unwrap_or_default();
        viewer_state.set_last_selection(project_name, model_name);
        if let Err(e) = self.state_repository.save(&viewer_state).await {
            tracing::warn!(error = %e, "failed to persist last selection");
        }
    }
}

/// Resolution order, first match wins: the designated default view when
/// well-formed, then the first spatial view, then the first drawing view.
/// A model with none of these has no usable view.
async fn resolve_default_view(connection: &dyn ModelConnection) -> Result<ViewId> {
    if let Some(id) = connection.default_view_id().await? {
        if id.is_well_formed() {
            return Ok(id);
        }
    }

    for kind in [ViewKind::Spatial, ViewKind::Drawing] {
        if let Some(view) = connection.views_of_kind(kind).await?.into_iter().next() {
            return Ok(view.id);
        }
    }

    Err(VantageError::no_view_definition(
        connection.model_id().as_str(),
    ))
}

async fn close_quietly(connection: &dyn ModelConnection) {
    if let Err(e) = connection.close().await {
        tracing::warn!(error = %e, "failed to close model connection");
    }
}
