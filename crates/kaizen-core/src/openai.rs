use crate::assistant::{LlmProvider, ProviderReply, StreamEvent};
use crate::backend::BackendError;
use crate::openai::error::OpenAiError;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use async_stream::try_stream;
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use futures::StreamExt;
use kaizen_config::assistant::{AssistantConfig, DeliveryMode};
use kaizen_model::assistant::AssistantRequest;
use std::error::Error;
use std::fmt::Write;
use std::time::Duration;
use tracing::instrument;

pub mod error;

/// Answers questions through an OpenAI compatible chat completion api.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiProvider {
    pub fn new(config: &AssistantConfig, timeout: Duration) -> Result<Self, OpenAiError> {
        let mut openai_config = OpenAIConfig::new().with_api_base(config.service.get_base());
        if let Some(api_key) = &config.api_key {
            openai_config = openai_config.with_api_key(api_key);
        }

        let http_client = reqwest::Client::builder().timeout(timeout).build().map_err(|error| {
            tracing::error!(error = &error as &dyn Error, "failed to build http client for openai");
            OpenAiError::HttpClientBuild(error)
        })?;

        // Failed questions are asked again by the learner, not retried here.
        let backoff = ExponentialBackoffBuilder::default()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            model: config.model().to_owned(),
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &AssistantRequest) -> Result<CreateChatCompletionRequest, OpenAiError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages(request)?);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        Ok(args.build()?)
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    pub async fn call(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, OpenAiError> {
        let request = self.build_request(request)?;

        match delivery {
            DeliveryMode::Complete => {
                let completion = self.client.chat().create(request).await.map_err(|error| {
                    tracing::warn!(error = &error as &dyn Error, "open AI call failed");
                    OpenAiError::Api(error)
                })?;
                let answer = completion
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .ok_or(OpenAiError::EmptyResponse)?;
                Ok(ProviderReply::Answer(answer))
            }
            DeliveryMode::Streaming => {
                tracing::debug!("Using streaming OpenAI call");
                let mut stream = self.client.chat().create_stream(request).await.map_err(|error| {
                    tracing::warn!(error = &error as &dyn Error, "open AI stream failed to start");
                    OpenAiError::Api(error)
                })?;

                let stream = try_stream! {
                    let mut finished = false;
                    while let Some(chunk) = stream.next().await {
                        let chunk = chunk.map_err(|error| BackendError::from(OpenAiError::Api(error)))?;
                        if let Some(choice) = chunk.choices.into_iter().next() {
                            if let Some(content) = choice.delta.content {
                                if !content.is_empty() {
                                    yield StreamEvent::Chunk(content);
                                }
                            }
                            finished |= choice.finish_reason.is_some();
                        }
                    }
                    // A stream closed without a finish reason was cut off.
                    if finished {
                        yield StreamEvent::Done;
                    }
                };
                Ok(ProviderReply::Stream(stream.boxed()))
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn ask(&self, request: &AssistantRequest, delivery: DeliveryMode) -> Result<ProviderReply, BackendError> {
        Ok(self.call(request, delivery).await?)
    }
}

fn system_prompt(request: &AssistantRequest) -> String {
    let mut prompt = format!(
        "You are a tutor in the online course \"{}\". Answer the learner's questions about the course \
         material clearly and briefly.",
        request.course_id
    );
    match (&request.module_name, &request.module_id) {
        (Some(name), _) => {
            let _ = write!(prompt, " The learner is working on the module \"{name}\".");
        }
        (None, Some(id)) => {
            let _ = write!(prompt, " The learner is working on the module \"{id}\".");
        }
        (None, None) => {}
    }
    if let Some(excerpt) = &request.context_excerpt {
        let _ = write!(prompt, "\n\nThe learner is currently reading:\n\"\"\"\n{excerpt}\n\"\"\"");
    }
    prompt
}

fn messages(request: &AssistantRequest) -> Result<Vec<ChatCompletionRequestMessage>, OpenAiError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(system_prompt(request))
        .build()?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(request.question.as_str())
        .build()?;
    Ok(vec![system.into(), user.into()])
}
