use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error(transparent)]
    Api(#[from] async_openai::error::OpenAIError),

    #[error("No response from OpenAi")]
    EmptyResponse,

    #[error(transparent)]
    HttpClientBuild(#[from] reqwest::Error),
}
