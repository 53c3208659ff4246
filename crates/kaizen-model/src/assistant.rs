use serde::{Deserialize, Serialize};

/// Data line that closes an assistant event stream.
pub const STREAM_DONE: &str = "[DONE]";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantRequest {
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub module_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub module_name: Option<String>,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context_excerpt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantAnswer {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantDelta {
    pub delta: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_skips_missing_context() {
        let request = AssistantRequest {
            course_id: "spc-201".to_owned(),
            module_id: None,
            module_name: None,
            question: "What is SPC?".to_owned(),
            context_excerpt: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"course_id": "spc-201", "question": "What is SPC?"})
        );
    }
}
