// Conversation data models
// Append-only message log for one build session

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifact::CodeFile;

/// Greeting shown before the first generation
pub const GREETING_MESSAGE: &str =
    "Hi! I'm Synth. Describe the website or app you'd like to build, and I'll generate the code for you.";

/// Message author role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single conversation entry. Never mutated after creation; the
/// expanded/collapsed state of its step list is view state owned by the
/// log, not part of the message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Session-local id, strictly increasing in append order
    pub id: u64,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Files produced by the generation this message reports (assistant only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<CodeFile>>,
    /// Human-readable development step descriptions (assistant only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

/// Append-only conversation log with monotonic message ids
#[derive(Debug, Clone)]
pub struct ConversationLog {
    messages: Vec<Message>,
    next_id: u64,
    /// Message ids whose step list is currently expanded (view state)
    expanded: HashSet<u64>,
}

impl ConversationLog {
    /// Create a log seeded with the assistant greeting
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 1,
            expanded: HashSet::new(),
        };
        log.push(MessageRole::Assistant, GREETING_MESSAGE, None, None);
        log
    }

    fn push(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        files: Option<Vec<CodeFile>>,
        steps: Option<Vec<String>>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
            files,
            steps,
        });
        id
    }

    /// Append a user message, returning its id
    pub fn push_user(&mut self, content: impl Into<String>) -> u64 {
        self.push(MessageRole::User, content, None, None)
    }

    /// Append a plain assistant message (greeting, failure notice)
    pub fn push_assistant(&mut self, content: impl Into<String>) -> u64 {
        self.push(MessageRole::Assistant, content, None, None)
    }

    /// Append the assistant completion message carrying the generated files
    /// and step descriptions. Its step list starts expanded.
    pub fn push_completion(
        &mut self,
        content: impl Into<String>,
        files: Option<Vec<CodeFile>>,
        steps: Vec<String>,
    ) -> u64 {
        let id = self.push(MessageRole::Assistant, content, files, Some(steps));
        self.expanded.insert(id);
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Toggle the expanded/collapsed state of a message's step list
    pub fn toggle_steps(&mut self, id: u64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: u64) -> bool {
        self.expanded.contains(&id)
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_seeded_with_greeting() {
        let log = ConversationLog::new();
        assert_eq!(log.len(), 1);
        let greeting = log.last().unwrap();
        assert_eq!(greeting.role, MessageRole::Assistant);
        assert_eq!(greeting.content, GREETING_MESSAGE);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut log = ConversationLog::new();
        let a = log.push_user("build me a site");
        let b = log.push_assistant("working on it");
        let c = log.push_user("thanks");
        assert!(a < b && b < c);

        let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_user_message_precedes_response() {
        let mut log = ConversationLog::new();
        let user = log.push_user("prompt");
        let reply = log.push_completion("done", None, vec!["1. step".to_string()]);
        assert!(user < reply);
        assert_eq!(log.messages()[1].role, MessageRole::User);
        assert_eq!(log.messages()[2].role, MessageRole::Assistant);
    }

    #[test]
    fn test_completion_starts_expanded() {
        let mut log = ConversationLog::new();
        let id = log.push_completion("done", None, vec!["1. step".to_string()]);
        assert!(log.is_expanded(id));

        log.toggle_steps(id);
        assert!(!log.is_expanded(id));
        log.toggle_steps(id);
        assert!(log.is_expanded(id));
    }

    #[test]
    fn test_plain_messages_not_expanded() {
        let mut log = ConversationLog::new();
        let id = log.push_assistant("failed");
        assert!(!log.is_expanded(id));
    }
}
