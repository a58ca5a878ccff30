// File: src/conversations/ids.rs

//! Identifier types for conversation records.
//!
//! Identifiers are plain strings of the form `<namespace>_<32 hex chars>`.
//! Generation is hidden behind [`IdGenerator`] so the store never depends on
//! a particular uniqueness strategy.
//!
//! ## Cargo features used by this module
//! - `uuid_v7`: enables `UUIDv7` generation via `uuid/v7`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Namespace used for conversation identifiers.
pub const CONVERSATION_NAMESPACE: &str = "conv";

/// Generate an ID intended to have good insert locality.
///
/// With feature `uuid_v7` enabled, this uses `Uuid::now_v7()`.
/// Otherwise it falls back to `Uuid::new_v4()`.
#[inline]
#[must_use]
fn uuid_time_ordered() -> Uuid {
    #[cfg(feature = "uuid_v7")]
    {
        Uuid::now_v7()
    }
    #[cfg(not(feature = "uuid_v7"))]
    {
        Uuid::new_v4()
    }
}

/// Source of globally unique, namespace-prefixed identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier inside `namespace`.
    fn generate(&self, namespace: &str) -> String;
}

/// Default generator backed by UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self, namespace: &str) -> String {
        format!("{namespace}_{}", uuid_time_ordered().simple())
    }
}

/// Errors returned when parsing a [`ConversationId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Empty (or whitespace-only) identifier.
    #[error("conversation id must not be empty")]
    Empty,
    /// Identifier is not in the `conv` namespace.
    #[error("conversation id must start with `conv_`, got {0:?}")]
    WrongNamespace(String),
    /// Nothing follows the namespace prefix.
    #[error("conversation id has no suffix after the namespace")]
    MissingSuffix,
}

/// Identifier of a conversation record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Generate a new identifier with the given generator.
    #[must_use]
    pub fn generate(generator: &dyn IdGenerator) -> Self {
        Self(generator.generate(CONVERSATION_NAMESPACE))
    }

    /// Validate and wrap a raw identifier.
    ///
    /// # Errors
    /// Returns `IdError` if the input is empty or outside the `conv` namespace.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, IdError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        let suffix = s
            .strip_prefix(CONVERSATION_NAMESPACE)
            .and_then(|rest| rest.strip_prefix('_'))
            .ok_or_else(|| IdError::WrongNamespace(s.to_owned()))?;
        if suffix.is_empty() {
            return Err(IdError::MissingSuffix);
        }

        Ok(Self(s.to_owned()))
    }

    /// Borrow as `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ConversationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generated_id_has_namespace_prefix() {
        let id = ConversationId::generate(&UuidIdGenerator);
        assert!(id.as_str().starts_with("conv_"));
        assert_eq!(id.as_str().len(), "conv_".len() + 32);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<ConversationId> = (0..1000)
            .map(|_| ConversationId::generate(&UuidIdGenerator))
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_parse_roundtrips_generated_id() {
        let id = ConversationId::generate(&UuidIdGenerator);
        let parsed: ConversationId = id.as_str().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(ConversationId::parse("  "), Err(IdError::Empty));
        assert_eq!(ConversationId::parse("conv_"), Err(IdError::MissingSuffix));
        assert_eq!(
            ConversationId::parse("task_123"),
            Err(IdError::WrongNamespace("task_123".to_string()))
        );
        assert_eq!(
            ConversationId::parse("conversation"),
            Err(IdError::WrongNamespace("conversation".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ConversationId::parse("conv_abc").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"conv_abc\"");
    }
}
