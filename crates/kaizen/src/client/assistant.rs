use crate::client::base::BaseClient;
use crate::client::platform::PlatformClient;
use async_trait::async_trait;
use futures::{StreamExt, future};
use http::Method;
use kaizen_config::assistant::DeliveryMode;
use kaizen_core::assistant::{ChunkStream, LlmProvider, ProviderReply, StreamEvent};
use kaizen_core::backend::BackendError;
use kaizen_http::EventStream;
use kaizen_model::assistant::{AssistantAnswer, AssistantDelta, AssistantRequest, STREAM_DONE};
use tracing::instrument;

#[async_trait]
impl LlmProvider for PlatformClient {
    #[instrument(skip_all, fields(course = %request.course_id, %delivery))]
    async fn ask(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        match delivery {
            DeliveryMode::Complete => {
                let answer: AssistantAnswer = self
                    .api_json_request(Method::POST, &["assistant", "ask"], request)
                    .await?;
                Ok(ProviderReply::Answer(answer.answer))
            }
            DeliveryMode::Streaming => {
                let events = self.api_event_request(&["assistant", "ask", "stream"], request).await?;
                Ok(ProviderReply::Stream(delta_stream(events)))
            }
        }
    }
}

fn delta_stream(events: EventStream<kaizen_http::Error>) -> ChunkStream {
    events
        .filter_map(|data| future::ready(parse_event(data).transpose()))
        .boxed()
}

/// Turns one event payload into a stream event. Empty payloads are keep-alives.
fn parse_event(data: Result<String, kaizen_http::Error>) -> Result<Option<StreamEvent>, BackendError> {
    let data = data?;
    let data = data.trim();
    if data.is_empty() {
        return Ok(None);
    }
    if data == STREAM_DONE {
        return Ok(Some(StreamEvent::Done));
    }
    let delta: AssistantDelta = serde_json::from_str(data)?;
    Ok(Some(StreamEvent::Chunk(delta.delta)))
}
