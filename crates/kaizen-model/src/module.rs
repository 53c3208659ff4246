use serde::{Deserialize, Serialize};
use std::fmt;

/// Addresses a module inside a course. Every module scoped endpoint is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    pub course_id: String,
    pub module_id: String,
}

impl ModuleRef {
    pub fn new(course_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            module_id: module_id.into(),
        }
    }

    /// Path segments of a module scoped endpoint. The ids stay single segments, so they
    /// have to be percent-encoded by whoever joins them into a url.
    #[must_use]
    pub fn api_segments<'a>(&'a self, suffix: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec!["courses", self.course_id.as_str(), "modules", self.module_id.as_str()];
        segments.extend_from_slice(suffix);
        segments
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.course_id, self.module_id)
    }
}
