//! Types for conversation management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ConversationId;

/// Title given to conversations created without one.
pub const DEFAULT_TITLE: &str = "New Conversation";

/// A message attached to a conversation.
///
/// The payload is opaque to the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(pub serde_json::Value);

/// A task attached to a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task(pub serde_json::Value);

/// An asset attached to a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(pub serde_json::Value);

/// A chat session and the records it owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique identifier.
    pub id: ConversationId,
    /// Display title.
    pub title: String,
    /// Creation time, set once.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Messages in order.
    pub messages: Vec<Message>,
    /// Tasks in order.
    pub tasks: Vec<Task>,
    /// Assets in order.
    pub assets: Vec<Asset>,
}

impl Conversation {
    /// Build a fresh, empty conversation.
    ///
    /// A missing or empty `title` falls back to [`DEFAULT_TITLE`].
    #[must_use]
    pub fn new(id: ConversationId, title: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: resolve_title(title),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            tasks: Vec::new(),
            assets: Vec::new(),
        }
    }
}

fn resolve_title(title: Option<&str>) -> String {
    match title {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}
