use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Cannot {operation} while the quiz is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Question {0} is not part of this quiz")]
    UnknownQuestion(String),

    #[error("Option {option} does not belong to question {question}")]
    UnknownOption { question: String, option: String },

    #[error("Question {0} has not been answered yet")]
    Unanswered(String),

    #[error("Already at the last question, submit the quiz instead")]
    LastQuestion,

    #[error("Already at the first question")]
    FirstQuestion,

    #[error("Question index {0} is out of range")]
    OutOfRange(usize),

    #[error("Unanswered questions: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("Submitting the quiz failed: {0}")]
    Submission(#[source] BackendError),

    #[error("Loading quiz results failed: {0}")]
    History(#[source] BackendError),

    #[error("Unexpected scoring response: {0}")]
    InvalidResponse(String),
}
