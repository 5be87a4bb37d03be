//! Name-based model resolution.
//!
//! Turns a `(project name, model name)` pair into identifiers via the
//! registry and model-hosting services, and opens the read-only connection.
//! The locator mutates no shared state; the session controller applies the
//! resulting transitions.

use std::sync::Arc;
use vantage_core::deeplink::{PARAM_MODEL_NAME, PARAM_PROJECT_NAME};
use vantage_core::error::{Result, VantageError};
use vantage_core::ids::{ModelId, ProjectId};
use vantage_core::services::{ConnectionService, ModelConnection, ModelHostClient, RegistryClient};

/// Outcome of a successful name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub project_id: ProjectId,
    pub model_id: ModelId,
    pub project_name: String,
    pub model_name: String,
}

/// Resolves project/model names against the remote services.
pub struct ModelLocator {
    registry: Arc<dyn RegistryClient>,
    model_host: Arc<dyn ModelHostClient>,
    connections: Arc<dyn ConnectionService>,
}

impl ModelLocator {
    pub fn new(
        registry: Arc<dyn RegistryClient>,
        model_host: Arc<dyn ModelHostClient>,
        connections: Arc<dyn ConnectionService>,
    ) -> Self {
        Self {
            registry,
            model_host,
            connections,
        }
    }

    /// Resolves the named project and model to their identifiers.
    ///
    /// Fails with `MissingParameter` before issuing any network call when
    /// either name is absent or empty. A registry lookup that errors or
    /// finds nothing yields `ProjectNotFound`; an empty model result set
    /// yields `ModelNotFound`. When several models share the name, the
    /// first entry in server-returned order wins; no tie-break is applied.
    pub async fn resolve(
        &self,
        project_name: Option<&str>,
        model_name: Option<&str>,
    ) -> Result<ResolvedModel> {
        let project_name = project_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| VantageError::missing_parameter(PARAM_PROJECT_NAME))?;
        let model_name = model_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| VantageError::missing_parameter(PARAM_MODEL_NAME))?;

        let project = match self.registry.project_by_name(project_name).await {
            Ok(Some(project)) => project,
            Ok(None) => return Err(VantageError::project_not_found(project_name)),
            Err(e) => {
                tracing::debug!(project = project_name, error = %e, "registry lookup failed");
                return Err(VantageError::project_not_found(project_name));
            }
        };

        let models = self
            .model_host
            .models_by_name(&project.id, model_name)
            .await?;
        let model = models
            .into_iter()
            .next()
            .ok_or_else(|| VantageError::model_not_found(model_name))?;

        Ok(ResolvedModel {
            project_id: project.id,
            model_id: model.id,
            project_name: project.name,
            model_name: model.name,
        })
    }

    /// Opens a read-only connection to the resolved model.
    pub async fn open(&self, resolved: &ResolvedModel) -> Result<Arc<dyn ModelConnection>> {
        self.connections
            .open_read_only(&resolved.project_id, &resolved.model_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockConnectionService, MockModelHost, MockRegistry};
    use vantage_core::project::{ModelSummary, Project};

    fn make_locator(
        registry: MockRegistry,
        host: MockModelHost,
    ) -> (ModelLocator, Arc<MockRegistry>, Arc<MockModelHost>) {
        let registry = Arc::new(registry);
        let host = Arc::new(host);
        let locator = ModelLocator::new(
            registry.clone(),
            host.clone(),
            Arc::new(MockConnectionService::default()),
        );
        (locator, registry, host)
    }

    #[tokio::test]
    async fn missing_project_name_short_circuits_without_network_calls() {
        let (locator, registry, host) = make_locator(MockRegistry::default(), MockModelHost::default());

        let err = locator.resolve(None, Some("Tower")).await.unwrap_err();
        assert_eq!(err, VantageError::missing_parameter("projectName"));
        assert_eq!(registry.calls(), 0);
        assert_eq!(host.calls(), 0);
    }

    #[tokio::test]
    async fn missing_model_name_short_circuits_without_network_calls() {
        let (locator, registry, host) = make_locator(MockRegistry::default(), MockModelHost::default());

        let err = locator.resolve(Some("Acme"), None).await.unwrap_err();
        assert_eq!(err, VantageError::missing_parameter("imodelName"));
        assert_eq!(registry.calls(), 0);
        assert_eq!(host.calls(), 0);
    }

    #[tokio::test]
    async fn an_empty_name_counts_as_missing() {
        let (locator, registry, _) = make_locator(MockRegistry::default(), MockModelHost::default());

        let err = locator.resolve(Some(""), Some("Tower")).await.unwrap_err();
        assert_eq!(err, VantageError::missing_parameter("projectName"));
        assert_eq!(registry.calls(), 0);
    }

    #[tokio::test]
    async fn an_unknown_project_is_project_not_found() {
        let (locator, _, _) = make_locator(MockRegistry::default(), MockModelHost::default());

        let err = locator.resolve(Some("Acme"), Some("Tower")).await.unwrap_err();
        assert_eq!(err, VantageError::project_not_found("Acme"));
    }

    #[tokio::test]
    async fn a_registry_failure_is_reported_as_project_not_found() {
        let registry = MockRegistry::failing();
        let (locator, _, _) = make_locator(registry, MockModelHost::default());

        let err = locator.resolve(Some("Acme"), Some("Tower")).await.unwrap_err();
        assert_eq!(err, VantageError::project_not_found("Acme"));
    }

    #[tokio::test]
    async fn an_empty_model_result_set_is_model_not_found() {
        let registry = MockRegistry::with_project(Project {
            id: "p-1".into(),
            name: "Acme".to_string(),
        });
        let (locator, _, _) = make_locator(registry, MockModelHost::default());

        let err = locator.resolve(Some("Acme"), Some("Tower")).await.unwrap_err();
        assert_eq!(err, VantageError::model_not_found("Tower"));
    }

    #[tokio::test]
    async fn the_first_model_in_server_order_wins() {
        let registry = MockRegistry::with_project(Project {
            id: "p-1".into(),
            name: "Acme".to_string(),
        });
        let host = MockModelHost::with_models(vec![
            ModelSummary {
                id: "m-1".into(),
                name: "Tower".to_string(),
                description: None,
            },
            ModelSummary {
                id: "m-2".into(),
                name: "Tower".to_string(),
                description: None,
            },
        ]);
        let (locator, _, _) = make_locator(registry, host);

        let resolved = locator.resolve(Some("Acme"), Some("Tower")).await.unwrap();
        assert_eq!(
            resolved,
            ResolvedModel {
                project_id: "p-1".into(),
                model_id: "m-1".into(),
                project_name: "Acme".to_string(),
                model_name: "Tower".to_string(),
            }
        );
    }
}
