use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct Api {
    /// Base url of the learning platform, overrides the config file
    #[arg(long, env = "KAIZEN_BASE_URL", required = false)]
    pub base_url: Option<Url>,
    /// Bearer token for the platform api
    #[arg(long, env = "KAIZEN_TOKEN", required = false, hide_env_values = true)]
    pub token: Option<String>,
    #[arg(long, required = false)]
    pub timeout_secs: Option<u64>,
}

impl Api {
    pub fn apply(self, config: &mut kaizen_config::api::ApiConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if self.token.is_some() {
            config.token = self.token;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
    }
}
