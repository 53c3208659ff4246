use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;

use crate::core::{BaseHttpClient, EventStream, HttpRequest, HttpResponse};
use crate::error::Error;
use reqwest::{Request, Response};
use reqwest_sse::EventSource;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut client_builder = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("kaizen/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self { client })
    }

    fn build_request(&self, request: HttpRequest) -> Result<Request, Error> {
        let (parts, body) = request.into_parts();
        self.client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .build()
            .map_err(Into::into)
    }

    async fn execute_request(&self, request: HttpRequest) -> Result<Response, Error> {
        let response = self.client.execute(self.build_request(request)?).await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            tracing::debug!(status = %response.status(), url = %response.url(), "request failed");
            Err(Error::StatusCode {
                status: response.status(),
                url: response.url().to_string(),
            })
        }
    }
}

fn response_parts(response: &Response) -> http::response::Builder {
    let mut http_response = http::response::Response::builder().status(response.status());
    if let Some(header_map) = http_response.headers_mut() {
        header_map.extend(response.headers().clone());
    }
    http_response
}

#[async_trait]
impl BaseHttpClient for ReqwestHttpClient {
    type Error = Error;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error> {
        let response = self.execute_request(request).await?;
        let http_response = response_parts(&response);
        let text = response.text().await?;
        http_response.body(text).map_err(Into::into)
    }

    async fn request_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<HttpResponse<T>, Self::Error> {
        let response = self.execute_request(request).await?;
        let http_response = response_parts(&response);
        let body = response.json().await?;
        http_response.body(body).map_err(Into::into)
    }

    async fn request_events(&self, request: HttpRequest) -> Result<EventStream<Self::Error>, Self::Error> {
        let events = self
            .execute_request(request)
            .await?
            .events()
            .await
            .map_err(|error| Error::EventSource(error.to_string()))?;

        Ok(events
            .map(|event| event.map(|event| event.data).map_err(|error| Error::Event(error.to_string())))
            .boxed())
    }
}
