use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    Ok,
    Error,
}

/// Health report of the platform backend. Components report either a bare state or a message.
#[derive(Debug, Serialize, Deserialize)]
pub struct Status {
    #[serde(flatten)]
    pub components: BTreeMap<String, Value>,
}

impl Status {
    #[must_use]
    pub fn component_state(&self, component: &str) -> Option<ComponentState> {
        let value = self.components.get(component)?;
        Some(match serde_json::from_value::<ComponentState>(value.clone()) {
            Ok(state) => state,
            // Components that report a message are up.
            Err(_) if value.is_string() => ComponentState::Ok,
            Err(_) => ComponentState::Error,
        })
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.components
            .keys()
            .all(|component| self.component_state(component) == Some(ComponentState::Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn component_states() {
        let status: Status = serde_json::from_value(json!({
            "database": "ok",
            "worker": "error",
            "llm": "degraded but serving"
        }))
        .unwrap();
        assert_eq!(status.component_state("database"), Some(ComponentState::Ok));
        assert_eq!(status.component_state("worker"), Some(ComponentState::Error));
        assert_eq!(status.component_state("llm"), Some(ComponentState::Ok));
        assert_eq!(status.component_state("missing"), None);
        assert!(!status.is_ok());
    }
}
