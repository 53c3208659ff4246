use crate::backend::QuizBackend;
use crate::invalidation::{InvalidationBus, Mutation};
use crate::quiz::error::QuizError;
use crate::quiz::score_percent;
use kaizen_config::quiz::PassThreshold;
use kaizen_model::module::ModuleRef;
use kaizen_model::quiz::question::QuizQuestion;
use kaizen_model::quiz::submission::{AnswerSubmission, SubmissionResponse};
use std::collections::HashMap;
use std::error::Error;
use strum::IntoStaticStr;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The module has no quiz.
    NoQuestions,
    /// Questions could not be fetched. Reopening the session retries.
    LoadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: u32,
    pub total: u32,
    pub score: u8,
    pub passed: bool,
    pub feedback: HashMap<String, bool>,
}

impl QuizOutcome {
    /// Ids of the questions the backend marked as wrong.
    #[must_use]
    pub fn incorrect(&self) -> Vec<&str> {
        let mut incorrect: Vec<&str> = self
            .feedback
            .iter()
            .filter(|(_, correct)| !**correct)
            .map(|(question, _)| question.as_str())
            .collect();
        incorrect.sort_unstable();
        incorrect
    }
}

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum QuizState {
    Closed,
    Loading,
    Unavailable(Unavailable),
    Presenting { index: usize },
    Submitting { index: usize },
    Results(QuizOutcome),
}

/// One attempt at a module quiz, from loading the questions to the scored result.
pub struct QuizSession<B> {
    module: ModuleRef,
    backend: B,
    threshold: PassThreshold,
    invalidation: Option<InvalidationBus>,
    state: QuizState,
    questions: Vec<QuizQuestion>,
    answers: AnswerSubmission,
    last_error: Option<String>,
}

impl<B: QuizBackend> QuizSession<B> {
    pub fn new(module: ModuleRef, backend: B, threshold: PassThreshold) -> Self {
        Self {
            module,
            backend,
            threshold,
            invalidation: None,
            state: QuizState::Closed,
            questions: Vec::new(),
            answers: AnswerSubmission::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn with_invalidation(mut self, bus: InvalidationBus) -> Self {
        self.invalidation = Some(bus);
        self
    }

    #[must_use]
    pub fn module(&self) -> &ModuleRef {
        &self.module
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn threshold(&self) -> PassThreshold {
        self.threshold
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSubmission {
        &self.answers
    }

    /// Error of the last failed submission, cleared by the next successful one.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            QuizState::Presenting { index } | QuizState::Submitting { index } => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current_index().and_then(|index| self.questions.get(index))
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        match &self.state {
            QuizState::Results(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.answers.selected(question_id)
    }

    /// Questions without a selection, in quiz order.
    #[must_use]
    pub fn unanswered(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|question| self.answers.selected(&question.id).is_none())
            .map(|question| question.id.as_str())
            .collect()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.state {
            QuizState::Presenting { index } => {
                index + 1 < self.questions.len() && self.answers.selected(&self.questions[index].id).is_some()
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.state, QuizState::Presenting { .. }) && self.unanswered().is_empty()
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidState {
            operation,
            state: (&self.state).into(),
        }
    }

    fn presenting_index(&self, operation: &'static str) -> Result<usize, QuizError> {
        match self.state {
            QuizState::Presenting { index } => Ok(index),
            _ => Err(self.invalid(operation)),
        }
    }

    fn reset(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.last_error = None;
    }

    /// Loads the questions. Empty or failed loads end in [`QuizState::Unavailable`].
    #[instrument(skip(self), fields(module = %self.module))]
    pub async fn open(&mut self) -> Result<&QuizState, QuizError> {
        if !matches!(self.state, QuizState::Closed | QuizState::Unavailable(_)) {
            return Err(self.invalid("open"));
        }
        self.reset();
        self.state = QuizState::Loading;

        self.state = match self.backend.fetch_questions(&self.module).await {
            Ok(questions) if questions.is_empty() => {
                tracing::info!("module has no quiz questions");
                QuizState::Unavailable(Unavailable::NoQuestions)
            }
            Ok(questions) => {
                tracing::debug!(count = questions.len(), "loaded quiz questions");
                self.questions = questions;
                QuizState::Presenting { index: 0 }
            }
            Err(error) => {
                tracing::warn!(error = &*error as &dyn Error, "failed to load quiz questions");
                QuizState::Unavailable(Unavailable::LoadFailed(error.to_string()))
            }
        };
        Ok(&self.state)
    }

    pub fn select(&mut self, question_id: &str, option_id: &str) -> Result<(), QuizError> {
        if !matches!(self.state, QuizState::Presenting { .. }) {
            return Err(self.invalid("select an answer"));
        }
        let question = self
            .questions
            .iter()
            .find(|question| question.id == question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_owned()))?;
        if !question.has_option(option_id) {
            return Err(QuizError::UnknownOption {
                question: question_id.to_owned(),
                option: option_id.to_owned(),
            });
        }
        self.answers.select(question_id, option_id);
        Ok(())
    }

    /// Selects an option of the question currently shown.
    pub fn select_current(&mut self, option_id: &str) -> Result<(), QuizError> {
        let index = self.presenting_index("select an answer")?;
        let question_id = self.questions[index].id.clone();
        self.select(&question_id, option_id)
    }

    pub fn next(&mut self) -> Result<usize, QuizError> {
        let index = self.presenting_index("advance")?;
        if index + 1 >= self.questions.len() {
            return Err(QuizError::LastQuestion);
        }
        let current = &self.questions[index];
        if self.answers.selected(&current.id).is_none() {
            return Err(QuizError::Unanswered(current.id.clone()));
        }
        self.state = QuizState::Presenting { index: index + 1 };
        Ok(index + 1)
    }

    pub fn previous(&mut self) -> Result<usize, QuizError> {
        let index = self.presenting_index("go back")?;
        if index == 0 {
            return Err(QuizError::FirstQuestion);
        }
        self.state = QuizState::Presenting { index: index - 1 };
        Ok(index - 1)
    }

    /// Jumps to `target`. Moving forward may not skip an unanswered question.
    pub fn go_to(&mut self, target: usize) -> Result<usize, QuizError> {
        let index = self.presenting_index("navigate")?;
        if target >= self.questions.len() {
            return Err(QuizError::OutOfRange(target));
        }
        if target > index {
            let skipped = self.questions[..target]
                .iter()
                .find(|question| self.answers.selected(&question.id).is_none());
            if let Some(skipped) = skipped {
                return Err(QuizError::Unanswered(skipped.id.clone()));
            }
        }
        self.state = QuizState::Presenting { index: target };
        Ok(target)
    }

    fn ordered_submission(&self) -> AnswerSubmission {
        let mut submission = AnswerSubmission::new();
        for question in &self.questions {
            if let Some(option_id) = self.answers.selected(&question.id) {
                submission.select(question.id.clone(), option_id);
            }
        }
        submission
    }

    fn evaluate(&self, response: SubmissionResponse) -> Result<QuizOutcome, QuizError> {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        if response.total != total {
            return Err(QuizError::InvalidResponse(format!(
                "scored {} questions but the quiz has {total}",
                response.total
            )));
        }
        if response.correct > response.total {
            return Err(QuizError::InvalidResponse(format!(
                "{} correct answers out of {}",
                response.correct, response.total
            )));
        }

        let passed = self.threshold.passes(response.correct, response.total);
        if passed != response.passed {
            tracing::warn!(
                backend = response.passed,
                client = passed,
                threshold = self.threshold.percent(),
                "pass verdict differs from backend"
            );
        }

        Ok(QuizOutcome {
            correct: response.correct,
            total: response.total,
            score: score_percent(response.correct, response.total),
            passed,
            feedback: response.feedback,
        })
    }

    /// Submits the answers. On failure the session returns to the current question with
    /// all answers kept, so the same answers can be submitted again.
    #[instrument(skip(self), fields(module = %self.module))]
    pub async fn submit(&mut self) -> Result<QuizOutcome, QuizError> {
        let index = self.presenting_index("submit")?;
        let missing: Vec<String> = self.unanswered().into_iter().map(str::to_owned).collect();
        if !missing.is_empty() {
            return Err(QuizError::Incomplete { missing });
        }

        let submission = self.ordered_submission();
        self.state = QuizState::Submitting { index };

        let result = self
            .backend
            .submit_answers(&self.module, &submission)
            .await
            .map_err(QuizError::Submission)
            .and_then(|response| self.evaluate(response));

        match result {
            Ok(outcome) => {
                tracing::info!(score = outcome.score, passed = outcome.passed, "quiz submitted");
                self.last_error = None;
                if let Some(bus) = &self.invalidation {
                    bus.publish(Mutation::QuizSubmitted {
                        module: self.module.clone(),
                        passed: outcome.passed,
                    });
                }
                self.state = QuizState::Results(outcome.clone());
                Ok(outcome)
            }
            Err(error) => {
                tracing::warn!(error = &error as &dyn Error, "quiz submission failed");
                self.last_error = Some(error.to_string());
                self.state = QuizState::Presenting { index };
                Err(error)
            }
        }
    }

    /// Drops every question, answer and result. Allowed in any state.
    pub fn close(&mut self) {
        self.reset();
        self.state = QuizState::Closed;
    }
}
