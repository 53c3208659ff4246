use clap::Args;
use kaizen_config::assistant::{AssistantConfig, AssistantProvider, DeliveryMode, LlmService};

#[derive(Debug, Clone, Args)]
pub struct Assistant {
    #[arg(long, required = false)]
    pub assistant_provider: Option<AssistantProvider>,
    #[arg(long, required = false)]
    pub llm_service: Option<LlmService>,
    #[arg(long, required = false)]
    pub llm_model: Option<String>,
    #[arg(long, env = "KAIZEN_LLM_KEY", required = false, hide_env_values = true)]
    pub llm_key: Option<String>,
    #[arg(long, required = false)]
    pub temperature: Option<f32>,
    #[arg(long, required = false)]
    pub delivery: Option<DeliveryMode>,
}

impl Assistant {
    pub fn apply(self, config: &mut AssistantConfig) -> Result<(), kaizen_config::error::ConfigError> {
        if let Some(provider) = self.assistant_provider {
            config.provider = provider;
        }
        if let Some(service) = self.llm_service {
            config.service = service;
        }
        if self.llm_model.is_some() {
            config.model = self.llm_model;
        }
        if self.llm_key.is_some() {
            config.api_key = self.llm_key;
        }
        if self.temperature.is_some() {
            config.temperature = self.temperature;
        }
        if let Some(delivery) = self.delivery {
            config.delivery = delivery;
        }
        config.validate()
    }
}
