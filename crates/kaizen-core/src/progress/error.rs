use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Updating progress failed: {0}")]
    Update(#[source] BackendError),

    #[error("Fetching progress failed: {0}")]
    Fetch(#[source] BackendError),

    /// The update was stored, only reading it back failed.
    #[error("Progress was stored but re-fetching it failed: {0}")]
    Refresh(#[source] BackendError),
}
