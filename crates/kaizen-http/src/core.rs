use async_trait::async_trait;
use futures::Stream;
use serde::de::DeserializeOwned;
use std::pin::Pin;

pub type HttpRequest = http::request::Request<Vec<u8>>;

pub type HttpResponse<T> = http::response::Response<T>;

/// Data payloads of a server-sent event stream, in arrival order.
pub type EventStream<E> = Pin<Box<dyn Stream<Item = Result<String, E>> + Send>>;

#[async_trait]
pub trait BaseHttpClient: Send + Sync + Clone {
    type Error;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error>;

    async fn request_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<HttpResponse<T>, Self::Error>;

    async fn request_events(&self, request: HttpRequest) -> Result<EventStream<Self::Error>, Self::Error>;
}
