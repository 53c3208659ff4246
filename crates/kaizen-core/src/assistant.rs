use crate::backend::BackendError;
use async_trait::async_trait;
use futures::Stream;
use kaizen_config::assistant::DeliveryMode;
use kaizen_model::assistant::AssistantRequest;
use std::pin::Pin;
use std::sync::Arc;

pub mod context;
pub mod error;
pub mod session;
pub mod shared;

/// Text shown in place of an answer when the provider failed.
pub const FAILURE_MESSAGE: &str = "Sorry, the assistant could not answer your question right now. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Chunk(String),
    /// The provider finished the answer. A stream ending without it was cut off.
    Done,
}

pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, BackendError>> + Send>>;

pub enum ProviderReply {
    Answer(String),
    Stream(ChunkStream),
}

/// A language model endpoint that answers one question per call.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn ask(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, BackendError>;
}

#[async_trait]
impl<T: LlmProvider + ?Sized> LlmProvider for Arc<T> {
    async fn ask(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        (**self).ask(request, delivery).await
    }
}

#[async_trait]
impl<T: LlmProvider + ?Sized> LlmProvider for Box<T> {
    async fn ask(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        (**self).ask(request, delivery).await
    }
}
