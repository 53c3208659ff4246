use async_trait::async_trait;
use kaizen_model::module::ModuleRef;
use kaizen_model::progress::ModuleProgress;
use kaizen_model::quiz::question::QuizQuestion;
use kaizen_model::quiz::result::QuizResult;
use kaizen_model::quiz::submission::{AnswerSubmission, SubmissionResponse};
use std::sync::Arc;

/// Transport independent failure of a backend call.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Questions of the module quiz. An empty list means the module has no quiz.
    async fn fetch_questions(&self, module: &ModuleRef) -> Result<Vec<QuizQuestion>, BackendError>;

    async fn submit_answers(
        &self,
        module: &ModuleRef,
        answers: &AnswerSubmission,
    ) -> Result<SubmissionResponse, BackendError>;

    async fn fetch_results(&self, module: &ModuleRef) -> Result<Vec<QuizResult>, BackendError>;
}

#[async_trait]
pub trait ProgressBackend: Send + Sync {
    async fn fetch_progress(&self, module: &ModuleRef) -> Result<ModuleProgress, BackendError>;

    async fn update_progress(&self, module: &ModuleRef, percentage: u8) -> Result<ModuleProgress, BackendError>;
}

#[async_trait]
impl<T: QuizBackend + ?Sized> QuizBackend for Arc<T> {
    async fn fetch_questions(&self, module: &ModuleRef) -> Result<Vec<QuizQuestion>, BackendError> {
        (**self).fetch_questions(module).await
    }

    async fn submit_answers(
        &self,
        module: &ModuleRef,
        answers: &AnswerSubmission,
    ) -> Result<SubmissionResponse, BackendError> {
        (**self).submit_answers(module, answers).await
    }

    async fn fetch_results(&self, module: &ModuleRef) -> Result<Vec<QuizResult>, BackendError> {
        (**self).fetch_results(module).await
    }
}

#[async_trait]
impl<T: ProgressBackend + ?Sized> ProgressBackend for Arc<T> {
    async fn fetch_progress(&self, module: &ModuleRef) -> Result<ModuleProgress, BackendError> {
        (**self).fetch_progress(module).await
    }

    async fn update_progress(&self, module: &ModuleRef, percentage: u8) -> Result<ModuleProgress, BackendError> {
        (**self).update_progress(module, percentage).await
    }
}
