//! Error types for the conversation store.

use thiserror::Error;

use super::ids::{ConversationId, IdError};

/// Conversation store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this identifier.
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),
    /// Identifier could not be parsed.
    #[error("invalid conversation id: {0}")]
    InvalidId(#[from] IdError),
}

/// Convenience result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
