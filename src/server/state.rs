//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::conversations::{ConversationStore, MemoryConversationStore};
use crate::page::Page;

/// Shared application state.
pub struct AppState {
    /// Conversation store.
    pub store: Arc<dyn ConversationStore>,
    /// Page shell served at `/`.
    pub page: Page,
}

impl AppState {
    /// Create state with an empty in-memory store and the default page.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_store(Arc::new(MemoryConversationStore::new()))
    }

    /// Create state around an existing store.
    #[must_use]
    pub fn with_store(store: Arc<dyn ConversationStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            page: Page::default(),
        })
    }
}
