use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct QuestionOption {
    pub option_id: String,
    pub option_text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl QuizQuestion {
    #[must_use]
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|option| option.option_id == option_id)
    }

    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.option_id == option_id)
    }
}
