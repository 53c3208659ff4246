use serde::Deserialize;
use std::path::Path;

use crate::api::ApiConfig;
use crate::assistant::AssistantConfig;
use crate::error::ConfigError;
use crate::quiz::QuizConfig;

pub mod api;
pub mod assistant;
pub mod error;
pub mod quiz;
pub mod v01;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
#[serde(tag = "version")]
pub enum VersionConfig {
    #[serde(rename = "0.1")]
    V01 { kaizen: v01::ClientConfigV01 },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub quiz: QuizConfig,
    pub assistant: AssistantConfig,
}

impl From<v01::ClientConfigV01> for ClientConfig {
    fn from(value: v01::ClientConfigV01) -> Self {
        Self {
            api: value.api,
            quiz: value.quiz,
            assistant: value.assistant,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            quiz: QuizConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }

    pub fn from_yaml(content: &[u8]) -> Result<Self, ConfigError> {
        let VersionConfig::V01 { kaizen } = serde_yml::from_slice::<VersionConfig>(content)?;
        let config: ClientConfig = kaizen.into();
        config.assistant.validate()?;
        Ok(config)
    }
}

pub async fn load(path: &Path) -> Result<ClientConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "Loading client config");
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let config = ClientConfig::from_yaml(&content)?;
    tracing::debug!(?config, "loaded client configuration");
    Ok(config)
}
