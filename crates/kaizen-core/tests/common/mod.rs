#![allow(dead_code)]

pub mod assistant;

use async_trait::async_trait;
use kaizen_core::backend::{BackendError, ProgressBackend, QuizBackend};
use kaizen_model::module::ModuleRef;
use kaizen_model::progress::ModuleProgress;
use kaizen_model::quiz::question::{QuestionOption, QuizQuestion};
use kaizen_model::quiz::result::QuizResult;
use kaizen_model::quiz::submission::{AnswerSubmission, SubmissionResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub fn module() -> ModuleRef {
    ModuleRef::new("quality-basics", "spc")
}

pub fn question(id: &str, options: &[&str]) -> QuizQuestion {
    QuizQuestion {
        id: id.to_owned(),
        question: format!("Question {id}?"),
        options: options
            .iter()
            .map(|option| QuestionOption {
                option_id: (*option).to_owned(),
                option_text: format!("Option {option}"),
            })
            .collect(),
    }
}

pub fn three_questions() -> Vec<QuizQuestion> {
    vec![
        question("q1", &["a", "b", "c"]),
        question("q2", &["a", "b", "c"]),
        question("q3", &["a", "b", "c"]),
    ]
}

pub fn response(correct: u32, total: u32, passed: bool, feedback: &[(&str, bool)]) -> SubmissionResponse {
    SubmissionResponse {
        correct,
        total,
        passed,
        feedback: feedback
            .iter()
            .map(|(question, correct)| ((*question).to_owned(), *correct))
            .collect(),
    }
}

pub struct MockQuizBackend {
    questions: Mutex<Result<Vec<QuizQuestion>, String>>,
    responses: Mutex<VecDeque<Result<SubmissionResponse, String>>>,
    submissions: Mutex<Vec<AnswerSubmission>>,
    results: Mutex<Vec<QuizResult>>,
}

impl Default for MockQuizBackend {
    fn default() -> Self {
        Self {
            questions: Mutex::new(Ok(Vec::new())),
            responses: Mutex::default(),
            submissions: Mutex::default(),
            results: Mutex::default(),
        }
    }
}

impl MockQuizBackend {
    pub fn with_questions(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions: Mutex::new(Ok(questions)),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            questions: Mutex::new(Err(message.to_owned())),
            ..Self::default()
        }
    }

    pub fn set_questions(&self, questions: Vec<QuizQuestion>) {
        *self.questions.lock().unwrap() = Ok(questions);
    }

    pub fn respond(&self, response: Result<SubmissionResponse, &str>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(response.map_err(str::to_owned));
    }

    pub fn set_results(&self, results: Vec<QuizResult>) {
        *self.results.lock().unwrap() = results;
    }

    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizBackend for MockQuizBackend {
    async fn fetch_questions(&self, _module: &ModuleRef) -> Result<Vec<QuizQuestion>, BackendError> {
        self.questions.lock().unwrap().clone().map_err(BackendError::from)
    }

    async fn submit_answers(
        &self,
        _module: &ModuleRef,
        answers: &AnswerSubmission,
    ) -> Result<SubmissionResponse, BackendError> {
        self.submissions.lock().unwrap().push(answers.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_owned()))
            .map_err(BackendError::from)
    }

    async fn fetch_results(&self, _module: &ModuleRef) -> Result<Vec<QuizResult>, BackendError> {
        Ok(self.results.lock().unwrap().clone())
    }
}

/// Stores progress per module. A monotonic backend never lowers a stored value.
#[derive(Default)]
pub struct MockProgressBackend {
    monotonic: bool,
    progress: Mutex<HashMap<ModuleRef, u8>>,
    updates: Mutex<Vec<u8>>,
    failures: Mutex<usize>,
    fetch_failures: Mutex<usize>,
}

impl MockProgressBackend {
    pub fn monotonic() -> Self {
        Self {
            monotonic: true,
            ..Self::default()
        }
    }

    pub fn fail_next_updates(&self, count: usize) {
        *self.failures.lock().unwrap() = count;
    }

    pub fn fail_next_fetches(&self, count: usize) {
        *self.fetch_failures.lock().unwrap() = count;
    }

    pub fn updates(&self) -> Vec<u8> {
        self.updates.lock().unwrap().clone()
    }

    pub fn stored(&self, module: &ModuleRef) -> Option<u8> {
        self.progress.lock().unwrap().get(module).copied()
    }
}

#[async_trait]
impl ProgressBackend for MockProgressBackend {
    async fn fetch_progress(&self, module: &ModuleRef) -> Result<ModuleProgress, BackendError> {
        {
            let mut failures = self.fetch_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err("progress service timed out".into());
            }
        }
        let percentage = self.stored(module).unwrap_or(0);
        Ok(ModuleProgress::new(module.clone(), percentage))
    }

    async fn update_progress(&self, module: &ModuleRef, percentage: u8) -> Result<ModuleProgress, BackendError> {
        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err("progress service unavailable".into());
            }
        }
        self.updates.lock().unwrap().push(percentage);
        let mut progress = self.progress.lock().unwrap();
        let stored = progress.entry(module.clone()).or_insert(0);
        *stored = if self.monotonic {
            (*stored).max(percentage)
        } else {
            percentage
        };
        Ok(ModuleProgress::new(module.clone(), *stored))
    }
}
