//! HTTP implementation of the model-hosting service lookup.

use crate::dto::ModelListDto;
use crate::http::{authorize, send_checked};
use crate::token::TokenProvider;
use reqwest::Client;
use std::sync::Arc;
use vantage_core::error::{Result, VantageError};
use vantage_core::ids::ProjectId;
use vantage_core::project::ModelSummary;
use vantage_core::services::ModelHostClient;

/// Model-hosting client that lists models by exact name under a project.
///
/// Response order is server-defined and preserved.
#[derive(Clone)]
pub struct HttpModelHostClient {
    client: Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl HttpModelHostClient {
    pub fn new(base_url: impl Into<String>, token: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }
}

#[async_trait::async_trait]
impl ModelHostClient for HttpModelHostClient {
    async fn models_by_name(&self, project: &ProjectId, name: &str) -> Result<Vec<ModelSummary>> {
        let url = format!("{}/projects/{}/imodels", self.base_url, project);
        tracing::debug!(project = %project, name, "querying models by name");

        let request = authorize(
            self.client.get(&url).query(&[("name", name)]),
            &self.token,
        );
        let response = send_checked(request).await?;

        let list: ModelListDto = response
            .json()
            .await
            .map_err(|e| VantageError::transport(e.to_string()))?;

        Ok(list.imodels.into_iter().map(Into::into).collect())
    }
}
