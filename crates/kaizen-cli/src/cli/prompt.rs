use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, PromptViMode};
use std::borrow::Cow;

/// Line prompt showing where the learner is, e.g. the current question.
#[derive(Clone, Default)]
pub struct SimplePrompt {
    pub label: String,
}

pub static DEFAULT_PROMPT_INDICATOR: &str = "〉";
pub static DEFAULT_VI_INSERT_PROMPT_INDICATOR: &str = ": ";
pub static DEFAULT_MULTILINE_INDICATOR: &str = "::: ";

impl SimplePrompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl Prompt for SimplePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.label)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::from("")
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<'_, str> {
        match prompt_mode {
            PromptEditMode::Default | PromptEditMode::Emacs | PromptEditMode::Vi(PromptViMode::Normal) => {
                DEFAULT_PROMPT_INDICATOR.into()
            }
            PromptEditMode::Vi(PromptViMode::Insert) => DEFAULT_VI_INSERT_PROMPT_INDICATOR.into(),
            PromptEditMode::Custom(mode) => format!("({mode})").into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(DEFAULT_MULTILINE_INDICATOR)
    }

    fn render_prompt_history_search_indicator(&self, history_search: PromptHistorySearch) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}reverse-search) \"{}\": ", history_search.term))
    }
}
