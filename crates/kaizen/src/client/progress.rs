use crate::client::base::BaseClient;
use crate::client::platform::PlatformClient;
use async_trait::async_trait;
use http::Method;
use kaizen_core::backend::{BackendError, ProgressBackend};
use kaizen_model::module::ModuleRef;
use kaizen_model::progress::{ModuleProgress, ProgressUpdate};
use tracing::instrument;

#[async_trait]
impl ProgressBackend for PlatformClient {
    #[instrument(skip(self), fields(%module))]
    async fn fetch_progress(&self, module: &ModuleRef) -> Result<ModuleProgress, BackendError> {
        match self.api_request(Method::GET, &module.api_segments(&["progress"])).await {
            Ok(progress) => Ok(progress),
            // Modules nobody has opened yet have no progress record.
            Err(error) if error.is_not_found() => Ok(ModuleProgress::new(module.clone(), 0)),
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(skip(self), fields(%module))]
    async fn update_progress(&self, module: &ModuleRef, percentage: u8) -> Result<ModuleProgress, BackendError> {
        Ok(self
            .api_json_request(Method::POST, &module.api_segments(&["progress"]), &ProgressUpdate { percentage })
            .await?)
    }
}
