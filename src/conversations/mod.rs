//! Conversation management module.
//!
//! This module provides the conversation record type, identifier
//! generation and the in-memory store.

pub mod errors;
pub mod ids;
pub mod store;
pub mod types;

pub use errors::{StoreError, StoreResult};
pub use ids::{ConversationId, IdError, IdGenerator, UuidIdGenerator};
pub use store::{ConversationStore, MemoryConversationStore};
pub use types::{Asset, Conversation, DEFAULT_TITLE, Message, Task};
