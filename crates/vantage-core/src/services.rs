//! Boundary traits for the external collaborators.
//!
//! Everything hard — the OAuth token exchange, the registry query protocol,
//! the briefcase/connection protocol, the rendering and selection engine —
//! lives behind these traits. The application layer consumes them as
//! constructor-injected `Arc<dyn …>` services; nothing reaches for ambient
//! global state.

use crate::auth::AuthSnapshot;
use crate::error::Result;
use crate::ids::{ElementId, ModelId, ProjectId, ViewId};
use crate::project::{ModelSummary, Project};
use crate::view::{ViewDefinitionSummary, ViewKind};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Transparency factor applied to all non-highlighted geometry by the
/// deep-link emphasis effect.
pub const EMPHASIS_TRANSPARENCY: f32 = 0.95;

/// External identity service.
///
/// Sign-in and sign-out are fire-and-forget from the viewer's perspective;
/// the only feedback path is the auth-state notification stream exposed via
/// [`IdentityProvider::subscribe`].
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current authorization state as last reported by the provider.
    fn is_authorized(&self) -> bool;

    /// Subscribes to auth-state change notifications.
    ///
    /// The receiver always holds the latest [`AuthSnapshot`]; a changed
    /// value is observed via `watch::Receiver::changed`.
    fn subscribe(&self) -> watch::Receiver<AuthSnapshot>;

    /// Starts the interactive sign-in round trip.
    async fn sign_in(&self) -> Result<()>;

    /// Ends the session with the identity provider.
    async fn sign_out(&self) -> Result<()>;
}

/// Project registry lookup.
#[async_trait::async_trait]
pub trait RegistryClient: Send + Sync {
    /// Looks up a project whose name equals `name` exactly. The match is
    /// case-sensitive and evaluated server-side.
    async fn project_by_name(&self, name: &str) -> Result<Option<Project>>;
}

/// Model-hosting service lookup.
#[async_trait::async_trait]
pub trait ModelHostClient: Send + Sync {
    /// Lists the models under `project` whose name equals `name` exactly,
    /// in server-defined order.
    async fn models_by_name(&self, project: &ProjectId, name: &str) -> Result<Vec<ModelSummary>>;
}

/// Opens read-only connections to remotely hosted models.
#[async_trait::async_trait]
pub trait ConnectionService: Send + Sync {
    async fn open_read_only(
        &self,
        project: &ProjectId,
        model: &ModelId,
    ) -> Result<Arc<dyn ModelConnection>>;
}

/// An open read-only connection to a remote model.
///
/// View queries are served through the connection. `close` is idempotent:
/// closing an already-closed connection is a no-op, never an error.
#[async_trait::async_trait]
pub trait ModelConnection: Send + Sync {
    fn project_id(&self) -> &ProjectId;

    fn model_id(&self) -> &ModelId;

    fn is_open(&self) -> bool;

    /// The model's designated default view id, if any. The returned id may
    /// still be ill-formed (the registry's `"0"` sentinel) and must be
    /// checked with [`ViewId::is_well_formed`] before use.
    async fn default_view_id(&self) -> Result<Option<ViewId>>;

    /// Saved view definitions of the given kind, in server-returned order.
    async fn views_of_kind(&self, kind: ViewKind) -> Result<Vec<ViewDefinitionSummary>>;

    async fn close(&self) -> Result<()>;
}

/// Notifications emitted by the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The view finished mounting and is ready for display-state changes.
    /// Emitted once per opened view.
    ViewOpened { view_id: ViewId },
    /// The live selection set changed.
    SelectionChanged { elements: Vec<ElementId> },
}

/// Display-state surface of the rendering viewport.
///
/// Methods mutate the viewport's display state; they are not pure. Event
/// consumers subscribe through [`ViewportControl::subscribe_events`].
pub trait ViewportControl: Send + Sync {
    fn subscribe_events(&self) -> broadcast::Receiver<ViewportEvent>;

    /// Frames the given elements in the view.
    fn zoom_to_elements(&self, ids: &[ElementId]);

    /// Highlights `ids` and applies `transparency` to all other geometry.
    fn emphasize_elements(&self, ids: &[ElementId], transparency: f32);

    /// Removes any active emphasis effect.
    fn clear_emphasis(&self);
}
