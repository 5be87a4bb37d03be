//! HTTP implementation of the project registry lookup.

use crate::dto::ProjectListDto;
use crate::http::{authorize, send_checked};
use crate::token::TokenProvider;
use reqwest::Client;
use std::sync::Arc;
use vantage_core::error::{Result, VantageError};
use vantage_core::project::Project;
use vantage_core::services::RegistryClient;

/// Registry client that queries projects by exact name.
///
/// The name filter is evaluated server-side; the client forwards the name
/// verbatim (case-sensitive) and takes the first entry of the response.
#[derive(Clone)]
pub struct HttpRegistryClient {
    client: Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl HttpRegistryClient {
    pub fn new(base_url: impl Into<String>, token: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }
}

#[async_trait::async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn project_by_name(&self, name: &str) -> Result<Option<Project>> {
        let url = format!("{}/projects", self.base_url);
        tracing::debug!(name, "querying registry for project");

        let request = authorize(
            self.client.get(&url).query(&[("name", name)]),
            &self.token,
        );
        let response = send_checked(request).await?;

        let list: ProjectListDto = response
            .json()
            .await
            .map_err(|e| VantageError::transport(e.to_string()))?;

        Ok(list.projects.into_iter().next().map(Into::into))
    }
}
