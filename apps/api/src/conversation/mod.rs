//! Conversation Store — ordered, append-only turns owned by a single session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod export;

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Turns in creation order. Never reordered; only `clear` removes anything.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    /// Lazy view over the turns in creation order. Cloning the iterator restarts it.
    pub fn replay(&self) -> impl Iterator<Item = &Turn> + Clone + '_ {
        self.turns.iter()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Removes every turn. Clearing an empty conversation is a no-op.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(conv: &Conversation) -> Vec<(Role, String)> {
        conv.replay().map(|t| (t.role, t.content.clone())).collect()
    }

    #[test]
    fn test_replay_preserves_append_order() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "first");
        conv.append(Role::Assistant, "second");
        conv.append(Role::User, "third");
        conv.append(Role::User, "third");

        assert_eq!(conv.len(), 4);
        assert_eq!(
            pairs(&conv),
            vec![
                (Role::User, "first".to_string()),
                (Role::Assistant, "second".to_string()),
                (Role::User, "third".to_string()),
                (Role::User, "third".to_string()),
            ]
        );
    }

    #[test]
    fn test_replay_is_restartable() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "a");
        conv.append(Role::Assistant, "b");

        let replay = conv.replay();
        let first: Vec<_> = replay.clone().collect();
        let second: Vec<_> = replay.collect();
        assert_eq!(first, second);
        assert_eq!(pairs(&conv), pairs(&conv));
        assert_eq!(conv.len(), 2);
    }

    #[test]
    fn test_clear_empties_conversation() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "hello");
        conv.append(Role::Assistant, "hi");

        conv.clear();
        assert!(conv.is_empty());
        assert_eq!(conv.replay().count(), 0);
    }

    #[test]
    fn test_clear_on_empty_is_noop() {
        let mut conv = Conversation::new();
        conv.clear();
        conv.clear();
        assert!(conv.is_empty());
    }

    #[test]
    fn test_append_after_clear_starts_fresh() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "old");
        conv.clear();
        conv.append(Role::User, "new");
        assert_eq!(pairs(&conv), vec![(Role::User, "new".to_string())]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            r#""assistant""#
        );
    }
}
