use crate::backend::QuizBackend;
use crate::quiz::error::QuizError;
use kaizen_model::module::ModuleRef;
use kaizen_model::quiz::result::QuizResult;

/// Past attempts at one module quiz, newest first.
#[derive(Debug, Clone, Default)]
pub struct QuizHistory {
    attempts: Vec<QuizResult>,
}

impl QuizHistory {
    #[must_use]
    pub fn new(mut attempts: Vec<QuizResult>) -> Self {
        attempts.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Self { attempts }
    }

    #[must_use]
    pub fn attempts(&self) -> &[QuizResult] {
        &self.attempts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&QuizResult> {
        self.attempts.first()
    }

    /// Highest scoring attempt; the most recent one wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&QuizResult> {
        self.attempts
            .iter()
            .rev()
            .max_by_key(|attempt| attempt.score)
    }

    #[must_use]
    pub fn has_passed(&self) -> bool {
        self.attempts.iter().any(|attempt| attempt.passed)
    }
}

pub async fn load_history<B: QuizBackend + ?Sized>(backend: &B, module: &ModuleRef) -> Result<QuizHistory, QuizError> {
    let results = backend.fetch_results(module).await.map_err(QuizError::History)?;
    tracing::debug!(%module, attempts = results.len(), "loaded quiz history");
    Ok(QuizHistory::new(results))
}
