//! Timestamped conversation records held by the memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Role tag for records originating from the user.
pub const ROLE_USER: &str = "user";
/// Role tag for records produced by the reasoning stage.
pub const ROLE_ASSISTANT: &str = "assistant";

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Unique, monotonically assigned record identifier.
///
/// Deserializing an id moves the process-wide counter past it, so ids minted
/// afterwards never repeat a loaded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub(crate) fn next() -> Self {
        Self(NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        NEXT_RECORD_ID.fetch_max(raw.saturating_add(1), Ordering::Relaxed);
        Ok(Self(raw))
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rec-{}", self.0)
    }
}

/// A single remembered message.
///
/// Fields are read-only once built: metadata can only be attached through
/// the consuming [`Record::with_metadata`] builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    content: String,
    role: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, Value>,
}

impl Record {
    /// Create a record with a fresh identifier.
    pub fn new(
        content: impl Into<String>,
        role: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::next(),
            content: content.into(),
            role: role.into(),
            created_at,
            metadata: BTreeMap::new(),
        }
    }

    /// Shorthand for a `user` record.
    pub fn user(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(content, ROLE_USER, created_at)
    }

    /// Shorthand for an `assistant` record.
    pub fn assistant(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::new(content, ROLE_ASSISTANT, created_at)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Replace the identifier with a freshly minted one.
    pub(crate) fn reassign_id(&mut self) {
        self.id = RecordId::next();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let now = Utc::now();
        let a = Record::user("first", now);
        let b = Record::user("second", now);
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_role_shorthands() {
        let now = Utc::now();
        assert_eq!(Record::user("q", now).role(), ROLE_USER);
        assert_eq!(Record::assistant("a", now).role(), ROLE_ASSISTANT);
        assert_eq!(Record::new("x", "tool", now).role(), "tool");
    }

    #[test]
    fn test_metadata_builder() {
        let r = Record::assistant("answer", Utc::now()).with_metadata("confidence", 0.85);
        assert_eq!(r.metadata().get("confidence"), Some(&Value::from(0.85)));
    }

    #[test]
    fn test_serde_roundtrip_keeps_id() {
        let r = Record::user("hello there", Utc::now()).with_metadata("lang", "en");
        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_loaded_id_is_never_reissued() {
        let ahead = Record::user("marker", Utc::now()).id().as_u64() + 1_000;
        let json = format!(
            r#"{{"id":{ahead},"content":"loaded","role":"user","created_at":"2024-01-01T00:00:00Z"}}"#
        );
        let loaded: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.id().as_u64(), ahead);

        let fresh = Record::user("fresh", Utc::now());
        assert!(fresh.id() > loaded.id());
    }

    #[test]
    fn test_reassign_id_mints_new_identity() {
        let mut r = Record::user("copy", Utc::now());
        let before = r.id();
        r.reassign_id();
        assert!(r.id() > before);
        assert_eq!(r.content(), "copy");
    }
}
