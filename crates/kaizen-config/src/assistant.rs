use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use url::Url;

use crate::api::redacted;
use crate::error::ConfigError;

pub const DEFAULT_MAX_EXCERPT_CHARS: usize = 4000;

/// Where assistant questions are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AssistantProvider {
    /// The platform's own assistant endpoint.
    #[default]
    Backend,
    /// An OpenAI compatible chat completion api.
    OpenAi,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DeliveryMode {
    /// One answer once the provider is done.
    #[default]
    Complete,
    /// Answer chunks as they arrive.
    Streaming,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum LlmService {
    #[default]
    OpenAI,
    Gwdg,
    Custom(Url),
}

impl FromStr for LlmService {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("openai") {
            Ok(LlmService::OpenAI)
        } else if s.eq_ignore_ascii_case("gwdg") {
            Ok(LlmService::Gwdg)
        } else {
            Url::parse(s)
                .map(LlmService::Custom)
                .map_err(|_| ConfigError::UnknownService(s.to_string()))
        }
    }
}

impl LlmService {
    #[must_use]
    pub fn get_base(&self) -> Cow<'_, str> {
        match self {
            LlmService::OpenAI => "https://api.openai.com/v1".into(),
            LlmService::Gwdg => "https://chat-ai.academiccloud.de/v1".into(),
            LlmService::Custom(url) => Cow::from(url.as_str()),
        }
    }

    #[must_use]
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmService::OpenAI => "gpt-4.1-mini",
            LlmService::Gwdg => "llama-3.3-70b-instruct",
            LlmService::Custom(_) => "llama-3.3-8b-instruct",
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AssistantConfig {
    #[serde(default)]
    pub provider: AssistantProvider,
    /// # Llm service used by the openai provider
    #[serde(default)]
    pub service: LlmService,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub delivery: DeliveryMode,
    /// # Longest document excerpt passed along with a question
    #[serde(default = "default_max_excerpt_chars")]
    pub max_excerpt_chars: usize,
}

fn default_max_excerpt_chars() -> usize {
    DEFAULT_MAX_EXCERPT_CHARS
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: AssistantProvider::default(),
            service: LlmService::default(),
            model: None,
            api_key: None,
            temperature: None,
            delivery: DeliveryMode::default(),
            max_excerpt_chars: DEFAULT_MAX_EXCERPT_CHARS,
        }
    }
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("provider", &self.provider)
            .field("service", &self.service)
            .field("model", &self.model)
            .field("api_key", &redacted(self.api_key.as_ref()))
            .field("temperature", &self.temperature)
            .field("delivery", &self.delivery)
            .field("max_excerpt_chars", &self.max_excerpt_chars)
            .finish()
    }
}

impl AssistantConfig {
    #[must_use]
    pub fn model(&self) -> &str {
        if let Some(model) = &self.model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for assistant");
            self.service.default_model()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.temperature {
            Some(temperature) if !(0.0..=2.0).contains(&temperature) => Err(ConfigError::Temperature(temperature)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_from_str() {
        assert!(matches!(LlmService::from_str("OpenAI"), Ok(LlmService::OpenAI)));
        assert!(matches!(LlmService::from_str("gwdg"), Ok(LlmService::Gwdg)));
        let custom = LlmService::from_str("http://llm.internal:8000/v1").unwrap();
        assert_eq!(custom.get_base(), "http://llm.internal:8000/v1");
        assert!(LlmService::from_str("not a service").is_err());
    }

    #[test]
    fn test_custom_service_keeps_path_case() {
        let custom = LlmService::from_str("http://llm.internal/V1/Chat").unwrap();
        assert_eq!(custom.get_base(), "http://llm.internal/V1/Chat");
        assert!(matches!(LlmService::from_str("GWDG"), Ok(LlmService::Gwdg)));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = AssistantConfig {
            api_key: Some("sk-live-123".to_owned()),
            model: Some("gpt-4.1-mini".to_owned()),
            ..AssistantConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-live-123"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("gpt-4.1-mini"));
    }

    #[test]
    fn test_provider_and_delivery_parsing() {
        assert_eq!(AssistantProvider::from_str("open-ai").unwrap(), AssistantProvider::OpenAi);
        assert_eq!(DeliveryMode::from_str("Streaming").unwrap(), DeliveryMode::Streaming);
    }

    #[test]
    fn test_default_model_per_service() {
        let config = AssistantConfig {
            service: LlmService::Gwdg,
            ..AssistantConfig::default()
        };
        assert_eq!(config.model(), "llama-3.3-70b-instruct");
    }

    #[test]
    fn test_temperature_validation() {
        let config = AssistantConfig {
            temperature: Some(3.5),
            ..AssistantConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Temperature(_))));
    }
}
