//! Conversation turns and per-session dialogue state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The receptionist agent.
    Assistant,
    /// The patient.
    User,
}

/// One message in the dialogue. Never modified once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }
}

/// Server-side state for one patient's registration dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub conversation: Vec<Turn>,
    /// Number of patient utterances processed; assistant turns don't count.
    pub turns_counted: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session whose transcript starts with the assistant greeting.
    pub fn start(id: SessionId, greeting: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            conversation: vec![Turn::assistant(greeting)],
            turns_counted: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a patient utterance and returns the new turn count.
    pub fn record_utterance(&mut self, content: impl Into<String>) -> u32 {
        self.conversation.push(Turn::user(content));
        self.turns_counted += 1;
        self.updated_at = Utc::now();
        self.turns_counted
    }

    /// Appends an assistant reply.
    pub fn record_reply(&mut self, content: impl Into<String>) {
        self.conversation.push(Turn::assistant(content));
        self.updated_at = Utc::now();
    }

    /// The opening assistant turn.
    pub fn greeting(&self) -> Option<&Turn> {
        self.conversation.first()
    }

    /// Most recent patient utterance.
    pub fn last_utterance(&self) -> Option<&str> {
        self.conversation
            .iter()
            .rev()
            .find(|turn| turn.role == TurnRole::User)
            .map(|turn| turn.content.as_str())
    }

    /// Wall-clock time since the session was opened.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_seeds_greeting() {
        let session = Session::start(SessionId::new(), "Hello!");

        assert_eq!(session.conversation.len(), 1);
        assert_eq!(session.greeting(), Some(&Turn::assistant("Hello!")));
        assert_eq!(session.turns_counted, 0);
    }

    #[test]
    fn only_user_turns_are_counted() {
        let mut session = Session::start(SessionId::new(), "Hello!");

        assert_eq!(session.record_utterance("John Smith"), 1);
        session.record_reply("How old are you?");
        assert_eq!(session.record_utterance("34"), 2);

        assert_eq!(session.turns_counted, 2);
        assert_eq!(session.conversation.len(), 4);
        assert_eq!(session.last_utterance(), Some("34"));
    }

    #[test]
    fn turn_role_serializes_lowercase() {
        let json = serde_json::to_string(&TurnRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
