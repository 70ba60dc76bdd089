use rig::message::Message;
use serde::{Deserialize, Serialize};

/// One entry of a session's conversation history. Histories only ever
/// grow: a completed turn appends one `User` and one `Assistant` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Turn {
    User { text: String },
    Assistant { text: String },
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn::User { text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Turn::Assistant { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Turn::User { text } | Turn::Assistant { text } => text,
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Turn::Assistant { .. })
    }
}

pub fn to_rig_messages(turns: &[Turn]) -> Vec<Message> {
    turns
        .iter()
        .map(|turn| match turn {
            Turn::User { text } => Message::user(text.clone()),
            Turn::Assistant { text } => Message::assistant(text.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_roles_round_trip() {
        let user = Turn::user("hello");
        let assistant = Turn::assistant("hi there");

        assert!(!user.is_assistant());
        assert!(assistant.is_assistant());
        assert_eq!(user.text(), "hello");
        assert_eq!(assistant.text(), "hi there");
    }

    #[test]
    fn rig_messages_preserve_order_and_roles() {
        let turns = vec![
            Turn::user("first"),
            Turn::assistant("second"),
            Turn::user("third"),
        ];

        let messages = to_rig_messages(&turns);
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], Message::User { .. }));
        assert!(matches!(messages[1], Message::Assistant { .. }));
        assert!(matches!(messages[2], Message::User { .. }));
    }
}
