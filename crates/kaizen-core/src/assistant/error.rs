use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("The assistant is still answering the previous question")]
    Busy,

    #[error("Cannot ask an empty question")]
    EmptyQuestion,

    #[error("No question is waiting for an answer")]
    NotWaiting,

    #[error("Provider returned no answer")]
    EmptyAnswer,

    #[error("Answer stream ended before the provider finished")]
    IncompleteStream,

    #[error("Assistant request failed: {0}")]
    Provider(#[source] BackendError),

    #[error("The assistant session was closed")]
    Cancelled,
}
