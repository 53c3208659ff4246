use crate::error::{Error, HttpError, InternalError};
use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use kaizen_config::api::ApiConfig;
use kaizen_http::{BaseHttpClient, EventStream, HttpClient, HttpRequest, HttpResponse};
use kaizen_model::status::Status;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub struct Config {
    pub base_url: ApiUrl,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: ApiUrl { url: base_url },
            token: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl From<&ApiConfig> for Config {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: ApiUrl {
                url: api.base_url.clone(),
            },
            token: api.token.clone(),
            timeout: api.timeout(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiUrl {
    pub url: Url,
}

impl From<ApiUrl> for Url {
    fn from(api_url: ApiUrl) -> Self {
        api_url.url
    }
}

impl ApiUrl {
    /// Url of a versioned api endpoint. Every segment is percent-encoded on its own, so an id
    /// can never introduce a query, a fragment or another path segment.
    pub fn for_api(&self, segments: &[&str]) -> Result<Url, InternalError> {
        if let Some(segment) = segments.iter().find(|segment| matches!(**segment, "" | "." | "..")) {
            return Err(InternalError::InvalidPathSegment((*segment).to_owned()));
        }
        let mut url = self.url.join("api/v0/")?;
        url.path_segments_mut()
            .map_err(|()| InternalError::CannotBeABase(self.url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
pub trait BaseClient: Send + Sync {
    fn get_http_client(&self) -> &HttpClient;
    fn get_config(&self) -> &Config;

    /// Request against the versioned api, carrying the bearer token when one is configured.
    fn build_request(&self, method: Method, path: &[&str], body: Option<Vec<u8>>) -> Result<HttpRequest, Error> {
        let url = self.get_config().base_url.for_api(path)?;
        let mut builder = http::request::Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        if let Some(token) = &self.get_config().token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(InternalError::from)?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }
        builder
            .body(body.unwrap_or_default())
            .map_err(|error| HttpError::from(error).into())
    }

    async fn api_send_request<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<HttpResponse<T>, HttpError> {
        tracing::debug!(method = ?request.method(), uri = ?request.uri(), "Sending API request");
        self.get_http_client()
            .request_json(request)
            .await
            .map_err(HttpError::from)
    }

    async fn api_request<T: DeserializeOwned>(&self, method: Method, path: &[&str]) -> Result<T, Error> {
        let request = self.build_request(method, path, None)?;
        let res = self.api_send_request(request).await?;
        Ok(res.into_body())
    }

    async fn api_json_request<B, T>(&self, method: Method, path: &[&str], body: &B) -> Result<T, Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(method, path, Some(serde_json::to_vec(body)?))?;
        let res = self.api_send_request(request).await?;
        Ok(res.into_body())
    }

    /// Posts `body` and returns the data of every server-sent event of the response.
    async fn api_event_request<B>(&self, path: &[&str], body: &B) -> Result<EventStream<kaizen_http::Error>, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.build_request(Method::POST, path, Some(serde_json::to_vec(body)?))?;
        tracing::debug!(uri = ?request.uri(), "Opening API event stream");
        self.get_http_client()
            .request_events(request)
            .await
            .map_err(|error| HttpError::from(error).into())
    }
}

#[async_trait]
pub trait PublicClient: BaseClient {
    async fn get_status(&self) -> Result<Status, Error> {
        self.api_request(Method::GET, &["status"]).await
    }
}

impl<T> PublicClient for T where T: BaseClient {}
