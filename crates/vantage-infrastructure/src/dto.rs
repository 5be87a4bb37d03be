//! Wire DTOs for the remote services.
//!
//! The remote APIs speak camelCase JSON; these types keep the wire shape
//! out of the domain models. Conversions into `vantage-core` types live
//! next to the DTOs.

use serde::{Deserialize, Serialize};
use vantage_core::ids::{ModelId, ProjectId, ViewId};
use vantage_core::project::{ModelSummary, Project};
use vantage_core::view::{ViewDefinitionSummary, ViewKind};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: ProjectId::new(dto.id),
            name: dto.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListDto {
    pub projects: Vec<ProjectDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ModelDto> for ModelSummary {
    fn from(dto: ModelDto) -> Self {
        Self {
            id: ModelId::new(dto.id),
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelListDto {
    pub imodels: Vec<ModelDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenConnectionRequestDto<'a> {
    pub project_id: &'a str,
    pub imodel_id: &'a str,
    pub mode: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultViewDto {
    #[serde(default)]
    pub view_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinitionDto {
    pub id: String,
    pub name: String,
    pub kind: ViewKind,
}

impl From<ViewDefinitionDto> for ViewDefinitionSummary {
    fn from(dto: ViewDefinitionDto) -> Self {
        Self {
            id: ViewId::new(dto.id),
            name: dto.name,
            kind: dto.kind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewListDto {
    pub views: Vec<ViewDefinitionDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequestDto<'a> {
    pub client_id: &'a str,
    pub redirect_uri: &'a str,
    pub grant_type: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseDto {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
