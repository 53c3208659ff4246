use crate::client::base::{BaseClient, Config};
use crate::error::{Error, HttpError};
use kaizen_config::api::ApiConfig;
use kaizen_http::HttpClient;

/// Client of the platform's REST api. Implements the quiz, progress and assistant backends
/// the sessions of `kaizen-core` run against.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    config: Config,
    http_client: HttpClient,
}

impl PlatformClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http_client = HttpClient::new(config.timeout).map_err(HttpError::from)?;
        Ok(Self { config, http_client })
    }

    pub fn from_api_config(api: &ApiConfig) -> Result<Self, Error> {
        Self::new(Config::from(api))
    }
}

impl BaseClient for PlatformClient {
    fn get_http_client(&self) -> &HttpClient {
        &self.http_client
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}
