//! HTTP implementation of the connection service.
//!
//! A connection is a server-side resource: opening POSTs a read-only
//! connection request, view queries read sub-resources of it, and closing
//! deletes it. The local handle only tracks whether it has been closed.

use crate::dto::{ConnectionDto, DefaultViewDto, OpenConnectionRequestDto, ViewListDto};
use crate::http::{authorize, send_checked};
use crate::token::TokenProvider;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use vantage_core::error::{Result, VantageError};
use vantage_core::ids::{ModelId, ProjectId, ViewId};
use vantage_core::services::{ConnectionService, ModelConnection};
use vantage_core::view::{ViewDefinitionSummary, ViewKind};

/// Opens read-only connections against the remote connection service.
#[derive(Clone)]
pub struct RemoteConnectionService {
    client: Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl RemoteConnectionService {
    pub fn new(base_url: impl Into<String>, token: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }
}

#[async_trait::async_trait]
impl ConnectionService for RemoteConnectionService {
    async fn open_read_only(
        &self,
        project: &ProjectId,
        model: &ModelId,
    ) -> Result<Arc<dyn ModelConnection>> {
        let url = format!("{}/connections", self.base_url);
        tracing::debug!(project = %project, model = %model, "opening read-only connection");

        let body = OpenConnectionRequestDto {
            project_id: project.as_str(),
            imodel_id: model.as_str(),
            mode: "readonly",
        };

        // Failures surface the underlying transport/auth message verbatim.
        let request = authorize(self.client.post(&url).json(&body), &self.token);
        let response = send_checked(request).await.map_err(|e| match e {
            VantageError::Transport { message } => VantageError::open_connection(message),
            other => other,
        })?;

        let dto: ConnectionDto = response
            .json()
            .await
            .map_err(|e| VantageError::open_connection(e.to_string()))?;

        Ok(Arc::new(RemoteModelConnection {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            id: dto.id,
            project_id: project.clone(),
            model_id: model.clone(),
            open: AtomicBool::new(true),
        }))
    }
}

/// An open connection resource on the remote service.
pub struct RemoteModelConnection {
    client: Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
    id: String,
    project_id: ProjectId,
    model_id: ModelId,
    open: AtomicBool,
}

#[async_trait::async_trait]
impl ModelConnection for RemoteModelConnection {
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
        let url = format!("{}/connections/{}/views/default", self.base_url, self.id);
        let request = authorize(self.client.get(&url), &self.token);

        let response = request
            .send()
            .await
            .map_err(|e| VantageError::transport(e.to_string()))?;

        // A model without a designated default view is not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VantageError::transport(crate::http::format_status(
                status, &body,
            )));
        }

        let dto: DefaultViewDto = response
            .json()
            .await
            .map_err(|e| VantageError::transport(e.to_string()))?;

        Ok(dto.view_id.map(ViewId::new))
    }

    async fn views_of_kind(&self, kind: ViewKind) -> Result<Vec<ViewDefinitionSummary>> {
        let url = format!("{}/connections/{}/views", self.base_url, self.id);
        let request = authorize(
            self.client.get(&url).query(&[("kind", kind.to_string())]),
            &self.token,
        );
        let response = send_checked(request).await?;

        let list: ViewListDto = response
            .json()
            .await
            .map_err(|e| VantageError::transport(e.to_string()))?;

        Ok(list.views.into_iter().map(Into::into).collect())
    }

    async fn close(&self) -> Result<()> {
        // Idempotent: only the first close releases the remote resource.
        if !self.open.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let url = format!("{}/connections/{}", self.base_url, self.id);
        let request = authorize(self.client.delete(&url), &self.token);
        if let Err(e) = send_checked(request).await {
            // The local handle is closed either way; the server reaps
            // orphaned connections on its own schedule.
            tracing::warn!(connection = %self.id, error = %e, "failed to release remote connection");
        }
        Ok(())
    }
}
