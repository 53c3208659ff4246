use kaizen_model::assistant::AssistantRequest;

/// What the learner is looking at while asking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantContext {
    pub course_id: String,
    pub module_id: Option<String>,
    pub module_name: Option<String>,
    pub excerpt: Option<String>,
}

impl AssistantContext {
    pub fn for_course(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_module(mut self, module_id: impl Into<String>, module_name: Option<String>) -> Self {
        self.module_id = Some(module_id.into());
        self.module_name = module_name;
        self
    }

    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    #[must_use]
    pub fn request(&self, question: &str, max_excerpt_chars: usize) -> AssistantRequest {
        AssistantRequest {
            course_id: self.course_id.clone(),
            module_id: self.module_id.clone(),
            module_name: self.module_name.clone(),
            question: question.trim().to_owned(),
            context_excerpt: self
                .excerpt
                .as_deref()
                .and_then(|excerpt| trim_excerpt(excerpt, max_excerpt_chars)),
        }
    }
}

fn trim_excerpt(excerpt: &str, max_chars: usize) -> Option<String> {
    let excerpt = excerpt.trim();
    if excerpt.is_empty() || max_chars == 0 {
        return None;
    }
    match excerpt.char_indices().nth(max_chars) {
        Some((end, _)) => Some(excerpt[..end].trim_end().to_owned()),
        None => Some(excerpt.to_owned()),
    }
}
