use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Response from {url} failed with status: {status}")]
    StatusCode { status: http::StatusCode, url: String },

    #[error(transparent)]
    Http(#[from] http::Error),

    #[error("Could not open event stream: {0}")]
    EventSource(String),

    #[error("Broken event stream: {0}")]
    Event(String),
}

impl Error {
    /// Status code of a non-success response, if that is what failed.
    #[must_use]
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::StatusCode { status, .. } => Some(*status),
            Self::Client(error) => error.status(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(http::StatusCode::NOT_FOUND)
    }
}
