use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Received invalid json data")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Whether the platform answered 404, which several endpoints use for "nothing there yet".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Http(HttpError::Kaizen(error)) if error.is_not_found())
    }
}

#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("'{0}' cannot be used as a path segment")]
    InvalidPathSegment(String),

    #[error("Base url {0} cannot carry a path")]
    CannotBeABase(url::Url),
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    Kaizen(#[from] kaizen_http::Error),

    #[error(transparent)]
    Http(#[from] http::Error),
}
