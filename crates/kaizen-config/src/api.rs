use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ApiConfig {
    /// # Base url of the learning platform
    pub base_url: Url,
    /// # Per request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// # Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,
}

/// Stands in for a secret in debug output.
pub(crate) fn redacted(secret: Option<&String>) -> Option<&'static str> {
    secret.map(|_| "<redacted>")
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &redacted(self.token.as_ref()))
            .finish()
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout_secs: None,
            token: None,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
