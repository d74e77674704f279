use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat bubble. Never mutated once appended to a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// UUIDv7, time-ordered
    pub id: Uuid,
    pub text: String,
    pub is_from_user: bool,
    /// Local wall-clock time as `HH:MM`
    pub timestamp_label: String,
    pub created_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(text: String, is_from_user: bool) -> Self {
        let created_at = Local::now();
        Self {
            id: Uuid::now_v7(),
            text,
            is_from_user,
            timestamp_label: created_at.format("%H:%M").to_string(),
            created_at,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), true)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text.into(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_roles_and_label_format() {
        let question = ChatMessage::user("How's my grip?");
        let answer = ChatMessage::assistant("Looks neutral.");

        assert!(question.is_from_user);
        assert!(!answer.is_from_user);
        assert_eq!(answer.timestamp_label.len(), 5);
        assert_eq!(&answer.timestamp_label[2..3], ":");
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<Uuid> = (0..50).map(|_| ChatMessage::assistant("x").id).collect();
        assert_eq!(ids.len(), 50);
    }
}
