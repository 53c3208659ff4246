use crate::backend::ProgressBackend;
use crate::invalidation::{InvalidationBus, Mutation};
use crate::progress::error::ProgressError;
use kaizen_model::module::ModuleRef;
use kaizen_model::progress::{COMPLETE, ModuleProgress};
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

pub mod error;
pub mod reporter;
pub mod viewer;

/// Records module completion on the backend and keeps the last fetched value per module.
///
/// The backend owns progress. Every update is followed by a fetch and only the fetched
/// value is cached, so a backend that refuses to lower progress is reflected as is.
pub struct ProgressTracker<B> {
    backend: Arc<B>,
    invalidation: Option<InvalidationBus>,
    cache: Arc<RwLock<HashMap<ModuleRef, ModuleProgress>>>,
}

impl<B> Clone for ProgressTracker<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            invalidation: self.invalidation.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<B: ProgressBackend> ProgressTracker<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            invalidation: None,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn with_invalidation(mut self, bus: InvalidationBus) -> Self {
        self.invalidation = Some(bus);
        self
    }

    /// Last fetched progress, without asking the backend.
    pub async fn progress(&self, module: &ModuleRef) -> Option<ModuleProgress> {
        self.cache.read().await.get(module).cloned()
    }

    #[instrument(skip(self), fields(%module))]
    pub async fn refresh(&self, module: &ModuleRef) -> Result<ModuleProgress, ProgressError> {
        let progress = self.backend.fetch_progress(module).await.map_err(|error| {
            tracing::warn!(error = &*error as &dyn Error, "failed to fetch module progress");
            ProgressError::Fetch(error)
        })?;
        self.cache.write().await.insert(module.clone(), progress.clone());
        Ok(progress)
    }

    /// Sends `percentage` (clamped to 0..=100) and returns the progress the backend reports afterwards.
    ///
    /// [`ProgressError::Refresh`] means the update went through but the value could not be
    /// read back. The cached value is dropped then, since it is known to be stale.
    #[instrument(skip(self), fields(%module))]
    pub async fn record(&self, module: &ModuleRef, percentage: u8) -> Result<ModuleProgress, ProgressError> {
        let percentage = percentage.min(COMPLETE);
        self.backend
            .update_progress(module, percentage)
            .await
            .map_err(|error| {
                tracing::warn!(error = &*error as &dyn Error, percentage, "failed to update module progress");
                ProgressError::Update(error)
            })?;
        tracing::debug!(percentage, "recorded module progress");

        if let Some(bus) = &self.invalidation {
            bus.publish(Mutation::ProgressUpdated { module: module.clone() });
        }
        match self.refresh(module).await {
            Err(ProgressError::Fetch(error)) => {
                self.cache.write().await.remove(module);
                Err(ProgressError::Refresh(error))
            }
            result => result,
        }
    }

    /// Marks the module as fully completed, e.g. after a passed quiz.
    pub async fn complete(&self, module: &ModuleRef) -> Result<ModuleProgress, ProgressError> {
        self.record(module, COMPLETE).await
    }
}
