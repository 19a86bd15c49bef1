use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only message log for one conversation.
///
/// `Empty` until the first append, `Active` afterwards, back to `Empty` on `clear`.
/// Not synchronized: the owner serializes access (see `ChatBot`).
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    messages: Vec<ConversationMessage>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unconditionally, preserving order.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        let message = match role {
            Role::User => ConversationMessage::user(content),
            Role::Assistant => ConversationMessage::assistant(content),
        };
        self.messages.push(message);
    }

    /// Owned copy of the log, safe to hand to the language model while the session moves on.
    pub fn snapshot(&self) -> Vec<ConversationMessage> {
        self.messages.clone()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = ConversationSession::new();
        assert!(session.is_empty());
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_preserves_append_order() {
        let mut session = ConversationSession::new();
        for i in 0..5 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            session.append(role, format!("message {i}"));
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.len(), 5);
        for (i, message) in snapshot.iter().enumerate() {
            assert_eq!(message.content, format!("message {i}"));
        }
        assert_eq!(snapshot[1].role, Role::Assistant);
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut session = ConversationSession::new();
        session.append(Role::User, "hi");
        session.append(Role::Assistant, "hello");
        assert_eq!(session.len(), 2);
        session.clear();
        assert!(session.snapshot().is_empty());
        session.append(Role::User, "again");
        assert_eq!(session.snapshot(), vec![ConversationMessage::user("again")]);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_appends() {
        let mut session = ConversationSession::new();
        session.append(Role::User, "first");
        let snapshot = session.snapshot();
        session.append(Role::Assistant, "second");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_append_accepts_empty_content() {
        let mut session = ConversationSession::new();
        session.append(Role::Assistant, "");
        assert_eq!(session.snapshot()[0], ConversationMessage::assistant(""));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ConversationMessage::user("q")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"q"}"#);
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
