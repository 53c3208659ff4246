use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Whether a message may still change. Only pending messages accept content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessagePhase {
    Pending,
    #[default]
    Final,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Answer,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub phase: MessagePhase,
    #[serde(default)]
    pub kind: MessageKind,
}

impl ChatMessage {
    fn new(role: Role, content: String, phase: MessagePhase, kind: MessageKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            created_at: Utc::now(),
            phase,
            kind,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), MessagePhase::Final, MessageKind::Answer)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), MessagePhase::Final, MessageKind::Answer)
    }

    #[must_use]
    pub fn pending_assistant() -> Self {
        Self::new(Role::Assistant, String::new(), MessagePhase::Pending, MessageKind::Answer)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), MessagePhase::Final, MessageKind::Error)
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.phase == MessagePhase::Pending
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_pending_message() {
        let message = ChatMessage::pending_assistant();
        let serialized = serde_json::to_value(&message).unwrap();
        assert_eq!(serialized["role"], json!("assistant"));
        assert_eq!(serialized["phase"], json!("pending"));
        assert_eq!(serialized["content"], json!(""));
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Assistant.to_string(), "assistant");
        let name: &'static str = Role::User.into();
        assert_eq!(name, "user");
    }
}
