//! In-memory mock services shared by the application-layer tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, watch};
use vantage_core::auth::AuthSnapshot;
use vantage_core::error::{Result, VantageError};
use vantage_core::ids::{ElementId, ModelId, ProjectId, ViewId};
use vantage_core::project::{ModelSummary, Project};
use vantage_core::services::{
    ConnectionService, IdentityProvider, ModelConnection, ModelHostClient, RegistryClient,
    ViewportControl, ViewportEvent,
};
use vantage_core::state::{StateRepository, ViewerState};
use vantage_core::view::{ViewDefinitionSummary, ViewKind};

#[derive(Default)]
pub(crate) struct MockRegistry {
    project: Option<Project>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockRegistry {
    pub fn with_project(project: Project) -> Self {
        Self {
            project: Some(project),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RegistryClient for MockRegistry {
    async fn project_by_name(&self, name: &str) -> Result<Option<Project>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(VantageError::transport("registry unavailable"));
        }
        Ok(self.project.clone().filter(|project| project.name == name))
    }
}

#[derive(Default)]
pub(crate) struct MockModelHost {
    models: Vec<ModelSummary>,
    calls: AtomicUsize,
}

impl MockModelHost {
    pub fn with_models(models: Vec<ModelSummary>) -> Self {
        Self {
            models,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelHostClient for MockModelHost {
    async fn models_by_name(&self, _project: &ProjectId, name: &str) -> Result<Vec<ModelSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .models
            .iter()
            .filter(|model| model.name == name)
            .cloned()
            .collect())
    }
}

pub(crate) struct MockConnection {
    project_id: ProjectId,
    model_id: ModelId,
    default_view: Option<ViewId>,
    spatial_views: Vec<ViewDefinitionSummary>,
    drawing_views: Vec<ViewDefinitionSummary>,
    open: AtomicBool,
    close_calls: AtomicUsize,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            project_id: "p-1".into(),
            model_id: "m-1".into(),
            default_view: None,
            spatial_views: Vec::new(),
            drawing_views: Vec::new(),
            open: AtomicBool::new(true),
            close_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_default_view(mut self, id: &str) -> Self {
        self.default_view = Some(ViewId::from(id));
        self
    }

    pub fn with_spatial_view(mut self, id: &str) -> Self {
        self.spatial_views.push(ViewDefinitionSummary {
            id: ViewId::from(id),
            name: format!("spatial {id}"),
            kind: ViewKind::Spatial,
        });
        self
    }

    pub fn with_drawing_view(mut self, id: &str) -> Self {
        self.drawing_views.push(ViewDefinitionSummary {
            id: ViewId::from(id),
            name: format!("drawing {id}"),
            kind: ViewKind::Drawing,
        });
        self
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelConnection for MockConnection {
    fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    async fn default_view_id(&self) -> Result<Option<ViewId>> {
        Ok(self.default_view.clone())
    }

    async fn views_of_kind(&self, kind: ViewKind) -> Result<Vec<ViewDefinitionSummary>> {
        Ok(match kind {
            ViewKind::Spatial => self.spatial_views.clone(),
            ViewKind::Drawing => self.drawing_views.clone(),
        })
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockConnectionService {
    connection: Option<Arc<MockConnection>>,
    fail_message: Option<String>,
    gate: Option<Arc<Notify>>,
}

impl MockConnectionService {
    pub fn with_connection(connection: Arc<MockConnection>) -> Self {
        Self {
            connection: Some(connection),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_message: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Makes `open_read_only` block until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait::async_trait]
impl ConnectionService for MockConnectionService {
    async fn open_read_only(
        &self,
        _project: &ProjectId,
        _model: &ModelId,
    ) -> Result<Arc<dyn ModelConnection>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(message) = &self.fail_message {
            return Err(VantageError::open_connection(message.clone()));
        }
        match &self.connection {
            Some(connection) => Ok(connection.clone() as Arc<dyn ModelConnection>),
            None => Err(VantageError::open_connection("no connection configured")),
        }
    }
}

pub(crate) struct MockIdentity {
    authorized: AtomicBool,
    notifications: watch::Sender<AuthSnapshot>,
    on_sign_in: Option<AuthSnapshot>,
}

impl MockIdentity {
    pub fn new(authorized: bool) -> Self {
        let (notifications, _) = watch::channel(AuthSnapshot {
            is_authorized: authorized,
        });
        Self {
            authorized: AtomicBool::new(authorized),
            notifications,
            on_sign_in: None,
        }
    }

    /// An identity provider whose sign-in never produces a notification.
    pub fn silent() -> Self {
        Self::new(false)
    }

    /// An identity provider that answers sign-in with the given snapshot.
    pub fn answering(snapshot: AuthSnapshot) -> Self {
        let mut identity = Self::new(false);
        identity.on_sign_in = Some(snapshot);
        identity
    }

    pub fn publish(&self, snapshot: AuthSnapshot) {
        self.authorized
            .store(snapshot.is_authorized, Ordering::SeqCst);
        self.notifications.send_replace(snapshot);
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentity {
    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.notifications.subscribe()
    }

    async fn sign_in(&self) -> Result<()> {
        if let Some(snapshot) = self.on_sign_in {
            self.publish(snapshot);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.publish(AuthSnapshot::unauthorized());
        Ok(())
    }
}

pub(crate) struct MockViewport {
    events: broadcast::Sender<ViewportEvent>,
    pub zoom_calls: Mutex<Vec<Vec<ElementId>>>,
    pub emphasize_calls: Mutex<Vec<(Vec<ElementId>, f32)>>,
    clear_calls: AtomicUsize,
}

impl MockViewport {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            events,
            zoom_calls: Mutex::new(Vec::new()),
            emphasize_calls: Mutex::new(Vec::new()),
            clear_calls: AtomicUsize::new(0),
        }
    }

    pub fn emit(&self, event: ViewportEvent) {
        let _ = self.events.send(event);
    }
}

impl ViewportControl for MockViewport {
    fn subscribe_events(&self) -> broadcast::Receiver<ViewportEvent> {
        self.events.subscribe()
    }

    fn zoom_to_elements(&self, ids: &[ElementId]) {
        self.zoom_calls.lock().unwrap().push(ids.to_vec());
    }

    fn emphasize_elements(&self, ids: &[ElementId], transparency: f32) {
        self.emphasize_calls
            .lock()
            .unwrap()
            .push((ids.to_vec(), transparency));
    }

    fn clear_emphasis(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct MockStateRepository {
    state: Mutex<ViewerState>,
    saves: AtomicUsize,
}

impl MockStateRepository {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> ViewerState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StateRepository for MockStateRepository {
    async fn load(&self) -> Result<ViewerState> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save(&self, state: &ViewerState) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = state.clone();
        Ok(())
    }
}
