use crate::client::base::BaseClient;
use crate::client::platform::PlatformClient;
use async_trait::async_trait;
use http::Method;
use kaizen_core::backend::{BackendError, QuizBackend};
use kaizen_model::module::ModuleRef;
use kaizen_model::quiz::question::QuizQuestion;
use kaizen_model::quiz::result::QuizResult;
use kaizen_model::quiz::submission::{AnswerSubmission, SubmissionRequest, SubmissionResponse};
use tracing::instrument;

#[async_trait]
impl QuizBackend for PlatformClient {
    #[instrument(skip(self), fields(%module))]
    async fn fetch_questions(&self, module: &ModuleRef) -> Result<Vec<QuizQuestion>, BackendError> {
        match self.api_request(Method::GET, &module.api_segments(&["quiz"])).await {
            Ok(questions) => Ok(questions),
            Err(error) if error.is_not_found() => {
                tracing::debug!("module has no quiz");
                Ok(Vec::new())
            }
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(skip(self, answers), fields(%module, answers = answers.len()))]
    async fn submit_answers(
        &self,
        module: &ModuleRef,
        answers: &AnswerSubmission,
    ) -> Result<SubmissionResponse, BackendError> {
        let body = SubmissionRequest { answers };
        Ok(self
            .api_json_request(Method::POST, &module.api_segments(&["quiz", "submit"]), &body)
            .await?)
    }

    #[instrument(skip(self), fields(%module))]
    async fn fetch_results(&self, module: &ModuleRef) -> Result<Vec<QuizResult>, BackendError> {
        match self.api_request(Method::GET, &module.api_segments(&["quiz", "results"])).await {
            Ok(results) => Ok(results),
            Err(error) if error.is_not_found() => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }
}
