use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A recorded attempt, as stored by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: String,
    pub module_id: String,
    pub score: u8,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: HashMap<String, bool>,
}
