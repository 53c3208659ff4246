use async_trait::async_trait;
use futures::{StreamExt, stream};
use kaizen_config::assistant::DeliveryMode;
use kaizen_core::assistant::{LlmProvider, ProviderReply, StreamEvent};
use kaizen_core::backend::BackendError;
use kaizen_model::assistant::AssistantRequest;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

pub enum Script {
    Answer(&'static str),
    Stream(Vec<Result<StreamEvent, &'static str>>),
    Fail(&'static str),
}

pub fn chunks(parts: &[&'static str]) -> Vec<Result<StreamEvent, &'static str>> {
    parts
        .iter()
        .map(|part| Ok(StreamEvent::Chunk((*part).to_owned())))
        .collect()
}

/// Replies with the scripted answers in order.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<(AssistantRequest, DeliveryMode)>>,
}

impl ScriptedProvider {
    pub fn new(scripts: impl IntoIterator<Item = Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<(AssistantRequest, DeliveryMode)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn ask(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        self.requests.lock().unwrap().push((request.clone(), delivery));
        let script = self.scripts.lock().unwrap().pop_front();
        match script {
            Some(Script::Answer(answer)) => Ok(ProviderReply::Answer(answer.to_owned())),
            Some(Script::Stream(events)) => {
                let events = events
                    .into_iter()
                    .map(|event| event.map_err(BackendError::from));
                Ok(ProviderReply::Stream(stream::iter(events).boxed()))
            }
            Some(Script::Fail(message)) => Err(message.into()),
            None => Err("no scripted reply".into()),
        }
    }
}

/// Holds every answer until the gate is opened.
#[derive(Default)]
pub struct GatedProvider {
    pub gate: Notify,
}

#[async_trait]
impl LlmProvider for GatedProvider {
    async fn ask(&self, _request: &AssistantRequest, _delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        self.gate.notified().await;
        Ok(ProviderReply::Answer("Statistical Process Control".to_owned()))
    }
}

/// Streams one chunk and then never finishes.
pub struct StalledProvider;

#[async_trait]
impl LlmProvider for StalledProvider {
    async fn ask(&self, _request: &AssistantRequest, _delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        let first = stream::iter(vec![Ok(StreamEvent::Chunk("Statis".to_owned()))]);
        Ok(ProviderReply::Stream(first.chain(stream::pending()).boxed()))
    }
}
