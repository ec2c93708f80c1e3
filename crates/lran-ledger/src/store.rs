//! # Versioned Entity Store
//!
//! [`EntityStore`] is the ledger seen by the registries: point reads with a
//! version, rich queries over committed JSON records, and an all-or-nothing
//! commit of a write-set guarded by the versions its transaction read.
//!
//! [`MemoryLedger`] is the in-process implementation. State lives behind a
//! `parking_lot::RwLock` that is never held across an `.await`; the lock is
//! non-poisoning, so a panicking writer cannot wedge the ledger.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lran_core::{LedgerError, LedgerResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::query::Selector;
use crate::transaction::{ReadSet, WriteSet};

/// A stored value with the ledger version that last wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    /// Commit version that produced this value.
    pub version: u64,
    /// Raw record bytes.
    pub value: Vec<u8>,
}

/// Key/value ledger with rich queries and atomic, version-checked commits.
pub trait EntityStore: Send + Sync {
    /// Read the committed value for `key`.
    fn get(&self, key: &str) -> LedgerResult<Option<VersionedValue>>;

    /// Return every committed `(key, bytes)` pair whose JSON record matches
    /// `selector`, in store order.
    fn rich_query(&self, selector: &Selector) -> LedgerResult<Vec<(String, Vec<u8>)>>;

    /// Validate `reads` against current versions and apply `writes` as one
    /// unit. Returns the new ledger version.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Conflict`] if any key in `reads` changed since it was
    /// read. Nothing from `writes` is applied in that case.
    fn commit(&self, reads: &ReadSet, writes: WriteSet) -> LedgerResult<u64>;
}

#[derive(Debug, Default)]
struct LedgerState {
    entries: BTreeMap<String, VersionedValue>,
    version: u64,
}

/// Thread-safe, cloneable in-memory ledger. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl MemoryLedger {
    /// Create an empty ledger at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ledger version (number of accepted commits).
    pub fn version(&self) -> u64 {
        self.state.read().version
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether the ledger holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export the ledger as a JSON-friendly snapshot.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Codec`] if a stored value is not a JSON document.
    pub fn snapshot(&self) -> LedgerResult<LedgerSnapshot> {
        let state = self.state.read();
        let mut entries = BTreeMap::new();
        for (key, stored) in &state.entries {
            let value = serde_json::from_slice(&stored.value)
                .map_err(|e| LedgerError::Codec(format!("value at {key:?}: {e}")))?;
            entries.insert(
                key.clone(),
                SnapshotEntry {
                    version: stored.version,
                    value,
                },
            );
        }
        Ok(LedgerSnapshot {
            version: state.version,
            taken_at: Utc::now(),
            entries,
        })
    }

    /// Rebuild a ledger from a snapshot, preserving per-key versions.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> LedgerResult<Self> {
        let mut entries = BTreeMap::new();
        for (key, entry) in snapshot.entries {
            if entry.version > snapshot.version {
                return Err(LedgerError::Codec(format!(
                    "entry {key:?} has version {} beyond ledger version {}",
                    entry.version, snapshot.version
                )));
            }
            let value = serde_json::to_vec(&entry.value)?;
            entries.insert(
                key,
                VersionedValue {
                    version: entry.version,
                    value,
                },
            );
        }
        Ok(Self {
            state: Arc::new(RwLock::new(LedgerState {
                entries,
                version: snapshot.version,
            })),
        })
    }
}

impl EntityStore for MemoryLedger {
    fn get(&self, key: &str) -> LedgerResult<Option<VersionedValue>> {
        Ok(self.state.read().entries.get(key).cloned())
    }

    fn rich_query(&self, selector: &Selector) -> LedgerResult<Vec<(String, Vec<u8>)>> {
        let state = self.state.read();
        let mut hits = Vec::new();
        for (key, stored) in &state.entries {
            // Non-JSON values can never match a field selector.
            let Ok(doc) = serde_json::from_slice::<serde_json::Value>(&stored.value) else {
                continue;
            };
            if selector.matches(&doc) {
                hits.push((key.clone(), stored.value.clone()));
            }
        }
        Ok(hits)
    }

    fn commit(&self, reads: &ReadSet, writes: WriteSet) -> LedgerResult<u64> {
        let mut state = self.state.write();

        for (key, seen) in reads {
            let current = state.entries.get(key).map(|v| v.version);
            if current != *seen {
                tracing::warn!(key = %key, ?seen, ?current, "commit rejected: stale read");
                return Err(LedgerError::Conflict { key: key.clone() });
            }
        }

        if writes.is_empty() {
            return Ok(state.version);
        }

        state.version += 1;
        let version = state.version;
        let count = writes.len();
        for (key, value) in writes.into_entries() {
            state.entries.insert(key, VersionedValue { version, value });
        }
        tracing::debug!(version, writes = count, "write-set committed");
        Ok(version)
    }
}

/// Serializable image of a [`MemoryLedger`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Ledger version at the time of the snapshot.
    pub version: u64,
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
    /// Every key with its version and JSON value.
    pub entries: BTreeMap<String, SnapshotEntry>,
}

/// One key in a [`LedgerSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Commit version that produced the value.
    pub version: u64,
    /// The record.
    pub value: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn put(ledger: &MemoryLedger, key: &str, value: serde_json::Value) -> u64 {
        let mut writes = WriteSet::default();
        writes.insert(key, serde_json::to_vec(&value).unwrap());
        ledger.commit(&ReadSet::new(), writes).unwrap()
    }

    #[test]
    fn commit_bumps_version_once_per_write_set() {
        let ledger = MemoryLedger::new();
        let mut writes = WriteSet::default();
        writes.insert("a", b"1".to_vec());
        writes.insert("b", b"2".to_vec());
        let v = ledger.commit(&ReadSet::new(), writes).unwrap();
        assert_eq!(v, 1);
        assert_eq!(ledger.get("a").unwrap().unwrap().version, 1);
        assert_eq!(ledger.get("b").unwrap().unwrap().version, 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn stale_read_rejects_whole_write_set() {
        let ledger = MemoryLedger::new();
        put(&ledger, "a", json!(1));

        let mut reads = ReadSet::new();
        reads.insert("a".into(), Some(1));
        put(&ledger, "a", json!(2));

        let mut writes = WriteSet::default();
        writes.insert("a", b"3".to_vec());
        writes.insert("b", b"4".to_vec());
        let err = ledger.commit(&reads, writes).unwrap_err();
        assert_eq!(err, LedgerError::Conflict { key: "a".into() });
        assert!(ledger.get("b").unwrap().is_none());
        assert_eq!(ledger.get("a").unwrap().unwrap().value, b"2".to_vec());
    }

    #[test]
    fn phantom_insert_is_a_conflict() {
        let ledger = MemoryLedger::new();
        let mut reads = ReadSet::new();
        reads.insert("new".into(), None);
        put(&ledger, "new", json!("other writer"));

        let mut writes = WriteSet::default();
        writes.insert("new", b"\"mine\"".to_vec());
        assert!(matches!(
            ledger.commit(&reads, writes),
            Err(LedgerError::Conflict { .. })
        ));
    }

    #[test]
    fn empty_write_set_does_not_bump_version() {
        let ledger = MemoryLedger::new();
        put(&ledger, "a", json!(1));
        assert_eq!(ledger.commit(&ReadSet::new(), WriteSet::default()).unwrap(), 1);
        assert_eq!(ledger.version(), 1);
    }

    #[test]
    fn rich_query_skips_non_json_and_keeps_key_order() {
        let ledger = MemoryLedger::new();
        put(&ledger, "k2", json!({"Type": "LAND"}));
        put(&ledger, "k1", json!({"Type": "LAND"}));
        let mut writes = WriteSet::default();
        writes.insert("k0", b"\xff\xfe".to_vec());
        ledger.commit(&ReadSet::new(), writes).unwrap();

        let hits = ledger.rich_query(&Selector::field_eq("Type", "LAND")).unwrap();
        let keys: Vec<_> = hits.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["k1", "k2"]);
    }

    #[test]
    fn snapshot_round_trip_preserves_versions() {
        let ledger = MemoryLedger::new();
        put(&ledger, "a", json!({"x": 1}));
        put(&ledger, "b", json!({"y": 2}));

        let snap = ledger.snapshot().unwrap();
        let text = serde_json::to_string(&snap).unwrap();
        let restored = MemoryLedger::from_snapshot(serde_json::from_str(&text).unwrap()).unwrap();

        assert_eq!(restored.version(), 2);
        assert_eq!(restored.get("a").unwrap().unwrap().version, 1);
        assert_eq!(restored.get("b").unwrap().unwrap().version, 2);
    }

    #[test]
    fn snapshot_with_future_entry_version_is_rejected() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "a".to_string(),
            SnapshotEntry {
                version: 9,
                value: json!(1),
            },
        );
        let snap = LedgerSnapshot {
            version: 1,
            taken_at: Utc::now(),
            entries,
        };
        assert!(MemoryLedger::from_snapshot(snap).is_err());
    }
}
