use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: String,
    pub option_id: String,
}

/// Chosen option per question, kept in the order the questions were answered first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSubmission {
    answers: IndexMap<String, String>,
}

impl AnswerSubmission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a selection, replacing any earlier choice for the same question.
    pub fn select(&mut self, question_id: impl Into<String>, option_id: impl Into<String>) -> Option<String> {
        self.answers.insert(question_id.into(), option_id.into())
    }

    #[must_use]
    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(q, o)| (q.as_str(), o.as_str()))
    }
}

impl Serialize for AnswerSubmission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.answers.len()))?;
        for (question_id, option_id) in &self.answers {
            seq.serialize_element(&Answer {
                question_id: question_id.clone(),
                option_id: option_id.clone(),
            })?;
        }
        seq.end()
    }
}

#[derive(Serialize, Debug)]
pub struct SubmissionRequest<'a> {
    pub answers: &'a AnswerSubmission,
}

/// Scoring returned by the backend for one submission.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
    #[serde(default)]
    pub feedback: HashMap<String, bool>,
}
