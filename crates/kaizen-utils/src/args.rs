pub mod api;
pub mod assistant;
pub mod quiz;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use kaizen_config::ClientConfig;
    use kaizen_config::api::ApiConfig;
    use kaizen_config::assistant::{DeliveryMode, LlmService};
    use url::Url;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        api: api::Api,
        #[command(flatten)]
        quiz: quiz::Quiz,
        #[command(flatten)]
        assistant: assistant::Assistant,
    }

    fn config() -> ClientConfig {
        ClientConfig::new(ApiConfig::new(Url::parse("https://learn.example.com/").unwrap()))
    }

    #[test]
    fn test_arguments_override_config() {
        let cli = TestCli::try_parse_from([
            "kaizen",
            "--base-url",
            "http://localhost:8080/",
            "--pass-threshold",
            "70",
            "--delivery",
            "streaming",
            "--llm-service",
            "gwdg",
        ])
        .unwrap();

        let mut config = config();
        cli.api.apply(&mut config.api);
        cli.quiz.apply(&mut config.quiz).unwrap();
        cli.assistant.apply(&mut config.assistant).unwrap();

        assert_eq!(config.api.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.quiz.pass_threshold.percent(), 70);
        assert_eq!(config.assistant.delivery, DeliveryMode::Streaming);
        assert!(matches!(config.assistant.service, LlmService::Gwdg));
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(TestCli::try_parse_from(["kaizen", "--pass-threshold", "0"]).is_err());
        assert!(TestCli::try_parse_from(["kaizen", "--pass-threshold", "101"]).is_err());
    }

    #[test]
    fn test_invalid_temperature() {
        let cli = TestCli::try_parse_from(["kaizen", "--temperature", "3.5"]).unwrap();
        let mut config = config();
        assert!(cli.assistant.apply(&mut config.assistant).is_err());
    }
}
