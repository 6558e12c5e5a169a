//! Context store collaborator.
//!
//! Tools record and read caller-scoped context through the [`ContextStore`]
//! trait: a navigation tool writes intent records, the WhatsApp context tool
//! reads recent message records. The hosted platform backs this with its own
//! persistence; [`MemoryContextStore`] is the in-process implementation used
//! for local runs and tests.

use crate::types::CallerId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// The kind tag of a context record.
///
/// Queries filter on this tag, so each tool touches only the record family
/// it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A navigation request recorded by the `navigate` tool.
    NavigationIntent,
    /// An ingested WhatsApp message, read by `read_whatsapp_context`.
    WhatsappMessage,
}

impl RecordKind {
    /// Returns the kind as its wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NavigationIntent => "navigation_intent",
            Self::WhatsappMessage => "whatsapp_message",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored, caller-scoped context record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    /// The record family
    pub kind: RecordKind,
    /// Arbitrary structured content
    pub body: Value,
    /// When the record was stored
    pub created_at: DateTime<Utc>,
}

/// Error raised by a context store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    kind: Box<StoreErrorKind>,
}

/// Specific store error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The backing store could not be reached.
    Unavailable {
        /// Description of the outage
        reason: String,
    },
    /// A query or write was rejected by the backing store.
    Rejected {
        /// Description of the rejection
        reason: String,
    },
}

impl StoreError {
    /// Creates a new StoreError with the given kind.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable {
            reason: reason.into(),
        })
    }

    /// Creates a rejected error.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Rejected {
            reason: reason.into(),
        })
    }

    /// Returns a reference to the error kind.
    #[must_use]
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            StoreErrorKind::Unavailable { reason } => {
                write!(f, "context store unavailable: {reason}")
            }
            StoreErrorKind::Rejected { reason } => {
                write!(f, "context store rejected the operation: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Caller-scoped persistence used by tools for their side effects.
///
/// Implementations must scope every operation to the given caller; one
/// caller's records are never visible to another.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Stores a record for the caller and returns it with its timestamp.
    async fn insert(
        &self,
        caller: &CallerId,
        kind: RecordKind,
        body: Value,
    ) -> Result<ContextRecord, StoreError>;

    /// Returns up to `limit` of the caller's records with the given kind,
    /// most recent first.
    async fn recent(
        &self,
        caller: &CallerId,
        kind: RecordKind,
        limit: usize,
    ) -> Result<Vec<ContextRecord>, StoreError>;
}

/// In-memory context store.
///
/// Records are appended per caller in arrival order; `recent` walks the
/// caller's records backwards so the newest come first.
#[derive(Debug, Default)]
pub struct MemoryContextStore {
    records: RwLock<HashMap<CallerId, Vec<ContextRecord>>>,
}

impl MemoryContextStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of records for a caller, across all kinds.
    pub async fn record_count(&self, caller: &CallerId) -> usize {
        let records = self.records.read().await;
        records.get(caller).map_or(0, Vec::len)
    }
}

#[async_trait]
impl ContextStore for MemoryContextStore {
    async fn insert(
        &self,
        caller: &CallerId,
        kind: RecordKind,
        body: Value,
    ) -> Result<ContextRecord, StoreError> {
        let record = ContextRecord {
            kind,
            body,
            created_at: Utc::now(),
        };
        let mut records = self.records.write().await;
        records
            .entry(caller.clone())
            .or_default()
            .push(record.clone());
        tracing::debug!(caller = %caller, kind = %kind, "context record stored");
        Ok(record)
    }

    async fn recent(
        &self,
        caller: &CallerId,
        kind: RecordKind,
        limit: usize,
    ) -> Result<Vec<ContextRecord>, StoreError> {
        let records = self.records.read().await;
        let matching = records
            .get(caller)
            .map(|rows| {
                rows.iter()
                    .rev()
                    .filter(|record| record.kind == kind)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn caller(name: &str) -> CallerId {
        CallerId::parse(name).unwrap()
    }

    #[tokio::test]
    async fn insert_and_read_back() {
        let store = MemoryContextStore::new();
        let user = caller("user_1");

        store
            .insert(&user, RecordKind::WhatsappMessage, json!({"text": "hi"}))
            .await
            .unwrap();

        let rows = store
            .recent(&user, RecordKind::WhatsappMessage, 10)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].body, json!({"text": "hi"}));
    }

    #[tokio::test]
    async fn recent_is_most_recent_first_and_limited() {
        let store = MemoryContextStore::new();
        let user = caller("user_1");

        for i in 0..5 {
            store
                .insert(&user, RecordKind::WhatsappMessage, json!({"n": i}))
                .await
                .unwrap();
        }

        let rows = store
            .recent(&user, RecordKind::WhatsappMessage, 3)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].body, json!({"n": 4}));
        assert_eq!(rows[2].body, json!({"n": 2}));
    }

    #[tokio::test]
    async fn recent_filters_by_kind() {
        let store = MemoryContextStore::new();
        let user = caller("user_1");

        store
            .insert(&user, RecordKind::NavigationIntent, json!({"path": "/a"}))
            .await
            .unwrap();
        store
            .insert(&user, RecordKind::WhatsappMessage, json!({"text": "hi"}))
            .await
            .unwrap();

        let rows = store
            .recent(&user, RecordKind::WhatsappMessage, 10)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, RecordKind::WhatsappMessage);
    }

    #[tokio::test]
    async fn records_are_scoped_to_caller() {
        let store = MemoryContextStore::new();
        let alice = caller("alice");
        let bob = caller("bob");

        store
            .insert(&alice, RecordKind::WhatsappMessage, json!({"text": "hi"}))
            .await
            .unwrap();

        let rows = store
            .recent(&bob, RecordKind::WhatsappMessage, 10)
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(store.record_count(&alice).await, 1);
        assert_eq!(store.record_count(&bob).await, 0);
    }

    #[test]
    fn record_kind_display() {
        assert_eq!(RecordKind::WhatsappMessage.to_string(), "whatsapp_message");
        assert_eq!(
            RecordKind::NavigationIntent.to_string(),
            "navigation_intent"
        );
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::unavailable("connection refused");
        assert!(err.to_string().contains("connection refused"));
        assert!(matches!(err.kind(), StoreErrorKind::Unavailable { .. }));
    }
}
