//! In-memory conversation store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::errors::{StoreError, StoreResult};
use super::ids::{ConversationId, IdGenerator, UuidIdGenerator};
use super::types::Conversation;

/// Trait for conversation storage.
pub trait ConversationStore: Send + Sync {
    /// Create and insert a new conversation stamped with `now`.
    fn create_at(&self, title: Option<&str>, now: DateTime<Utc>) -> Conversation;

    /// Create and insert a new conversation stamped with the current time.
    fn create(&self, title: Option<&str>) -> Conversation {
        self.create_at(title, Utc::now())
    }

    /// Snapshot of all conversations, most recently updated first.
    fn list(&self) -> Vec<Conversation>;

    /// Get a conversation by ID.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no record has this ID.
    fn get(&self, id: &ConversationId) -> StoreResult<Conversation>;

    /// Remove a conversation.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no record has this ID.
    fn delete(&self, id: &ConversationId) -> StoreResult<()>;

    /// Check if a conversation exists.
    fn exists(&self, id: &ConversationId) -> bool;

    /// Number of stored conversations.
    fn len(&self) -> usize;

    /// Whether the store holds no conversations.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A stored record plus its insertion sequence number.
#[derive(Clone)]
struct Entry {
    seq: u64,
    conversation: Conversation,
}

/// Thread-safe in-memory implementation of [`ConversationStore`].
///
/// Records live until the process exits. Listing breaks `updated_at` ties by
/// insertion order, newest first.
pub struct MemoryConversationStore {
    records: DashMap<ConversationId, Entry>,
    next_seq: AtomicU64,
    ids: Arc<dyn IdGenerator>,
}

impl Default for MemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConversationStore {
    /// Create an empty store with the default UUID generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(Arc::new(UuidIdGenerator))
    }

    /// Create an empty store with a custom ID generator.
    #[must_use]
    pub fn with_generator(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
            ids,
        }
    }
}

impl ConversationStore for MemoryConversationStore {
    fn create_at(&self, title: Option<&str>, now: DateTime<Utc>) -> Conversation {
        let id = ConversationId::generate(self.ids.as_ref());
        let conversation = Conversation::new(id.clone(), title, now);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        self.records.insert(
            id,
            Entry {
                seq,
                conversation: conversation.clone(),
            },
        );

        conversation
    }

    fn list(&self) -> Vec<Conversation> {
        let mut entries: Vec<Entry> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        entries.sort_by(|a, b| {
            b.conversation
                .updated_at
                .cmp(&a.conversation.updated_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        entries.into_iter().map(|e| e.conversation).collect()
    }

    fn get(&self, id: &ConversationId) -> StoreResult<Conversation> {
        self.records
            .get(id)
            .map(|entry| entry.conversation.clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn delete(&self, id: &ConversationId) -> StoreResult<()> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn exists(&self, id: &ConversationId) -> bool {
        self.records.contains_key(id)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeDelta;

    use super::*;
    use crate::conversations::types::DEFAULT_TITLE;

    /// Hands out `conv_1`, `conv_2`, ... for readable assertions.
    struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn generate(&self, namespace: &str) -> String {
            let n = self.0.fetch_add(1, Ordering::Relaxed) + 1;
            format!("{namespace}_{n}")
        }
    }

    #[test]
    fn test_create_uses_given_title() {
        let store = MemoryConversationStore::new();
        for title in ["Trip Plan", "a", "  padded  ", "日本語"] {
            let conv = store.create(Some(title));
            assert_eq!(conv.title, title);
        }
    }

    #[test]
    fn test_create_defaults_title() {
        let store = MemoryConversationStore::new();
        assert_eq!(store.create(None).title, DEFAULT_TITLE);
        assert_eq!(store.create(Some("")).title, DEFAULT_TITLE);
    }

    #[test]
    fn test_trip_plan_scenario() {
        let store = MemoryConversationStore::new();
        let conv = store.create(Some("Trip Plan"));

        assert_eq!(conv.title, "Trip Plan");
        assert!(conv.messages.is_empty());
        assert!(conv.tasks.is_empty());
        assert!(conv.assets.is_empty());
        assert_eq!(conv.created_at, conv.updated_at);
        assert_eq!(store.get(&conv.id).unwrap(), conv);
    }

    #[test]
    fn test_list_contains_new_record_exactly_once() {
        let store = MemoryConversationStore::new();
        store.create(Some("first"));
        let conv = store.create(Some("second"));
        store.create(Some("third"));

        let listed = store.list();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.iter().filter(|c| c.id == conv.id).count(), 1);
    }

    #[test]
    fn test_list_orders_by_updated_at_desc() {
        let store = MemoryConversationStore::new();
        let base = Utc::now();
        store.create_at(Some("middle"), base);
        store.create_at(Some("oldest"), base - TimeDelta::seconds(10));
        store.create_at(Some("newest"), base + TimeDelta::seconds(10));

        let listed = store.list();
        let titles: Vec<&str> = listed.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
        assert!(listed.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn test_list_breaks_ties_by_insertion_order() {
        let store =
            MemoryConversationStore::with_generator(Arc::new(SequentialIds(AtomicU64::new(0))));
        let now = Utc::now();
        store.create_at(None, now);
        store.create_at(None, now);

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|c| c.title == DEFAULT_TITLE));
        assert_eq!(listed[0].id.as_str(), "conv_2");
        assert_eq!(listed[1].id.as_str(), "conv_1");
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let store = MemoryConversationStore::new();
        store.create(None);
        let snapshot = store.list();
        store.create(None);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ids() {
        let store = MemoryConversationStore::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        store.create(None);
                    }
                });
            }
        });

        let ids: HashSet<ConversationId> = store.list().into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }

    #[test]
    fn test_get_and_delete_missing() {
        let store = MemoryConversationStore::new();
        let missing = ConversationId::parse("conv_missing").unwrap();

        assert!(matches!(store.get(&missing), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(&missing), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_record() {
        let store = MemoryConversationStore::new();
        let conv = store.create(None);
        assert!(store.exists(&conv.id));

        store.delete(&conv.id).unwrap();
        assert!(!store.exists(&conv.id));
        assert!(store.is_empty());
    }
}
