//! History store
//!
//! Bounded, ordered, durable record of past verdicts. Most-recent-first,
//! capped (5 in the shipped configuration), persisted wholesale after every
//! mutation as a JSON array under a fixed storage key. A corrupt or missing
//! snapshot loads as an empty history; it must never fail startup.
//!
//! Inconclusive verdicts are never archived. That is product policy, not an
//! oversight: an error result is retryable, not part of the record.

use crate::storage::KeyValueStorage;
use crate::verdict::Verdict;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A verdict plus its identity in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation-millis string; bumped on collision so entries never merge.
    pub id: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    /// `record` was called with an inconclusive verdict. Callers must not do
    /// that; the store refuses rather than silently archiving an error state.
    #[error("inconclusive verdicts are never archived")]
    Inconclusive,

    /// The entry is in memory (and visible through `all()`) but the snapshot
    /// could not be written. Non-fatal: the in-memory sequence stays the
    /// source of truth for the session.
    #[error("entry recorded in memory but not persisted: {source}")]
    Persist {
        entry: HistoryEntry,
        #[source]
        source: anyhow::Error,
    },
}

/// Ordered, size-bounded, durable collection of past verdicts.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl HistoryStore {
    /// Load the history from storage, or start empty when the snapshot is
    /// absent or unreadable. Never fails.
    pub fn open(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>, capacity: usize) -> Self {
        let key = key.into();
        let mut entries = match storage.get(&key) {
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "discarding corrupt history snapshot");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        entries.truncate(capacity);
        Self { entries, capacity, storage, key }
    }

    /// Archive a conclusive verdict: fresh id, prepend, truncate to capacity,
    /// persist the whole snapshot.
    pub fn record(&mut self, verdict: &Verdict) -> Result<HistoryEntry, HistoryError> {
        if !verdict.is_conclusive() {
            return Err(HistoryError::Inconclusive);
        }

        let entry = HistoryEntry {
            id: self.next_id(),
            verdict: verdict.clone(),
        };
        self.entries.insert(0, entry.clone());
        self.entries.truncate(self.capacity);

        match self.persist() {
            Ok(()) => Ok(entry),
            Err(source) => Err(HistoryError::Persist { entry, source }),
        }
    }

    /// Entries, most-recent-first.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn persist(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.storage.set(&self.key, &json)
    }

    fn next_id(&self) -> String {
        let mut id = Utc::now().timestamp_millis();
        while self.entries.iter().any(|e| e.id == id.to_string()) {
            id += 1;
        }
        id.to_string()
    }
}
