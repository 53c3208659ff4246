use serde::Deserialize;

use crate::api::ApiConfig;
use crate::assistant::AssistantConfig;
use crate::quiz::QuizConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ClientConfigV01 {
    pub api: ApiConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}
