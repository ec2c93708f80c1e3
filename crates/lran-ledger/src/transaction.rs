//! # Per-Operation Transactions
//!
//! A [`Transaction`] accumulates the read-set and write-set of one top-level
//! operation. Registry code reads and writes through it; chained calls
//! receive the same `&mut Transaction`, so their writes join the caller's
//! write-set. Only [`Transaction::commit`] touches the store, and it does so
//! once. Dropping a transaction discards everything it staged.

use std::collections::BTreeMap;

use lran_core::LedgerResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::query::Selector;
use crate::store::EntityStore;

/// Keys read by a transaction with the version observed (`None` = absent).
pub type ReadSet = BTreeMap<String, Option<u64>>;

/// Staged writes, keyed and ordered by ledger key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    writes: BTreeMap<String, Vec<u8>>,
}

impl WriteSet {
    /// Stage `value` at `key`, replacing any earlier staged value.
    pub fn insert(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), value);
    }

    /// The staged value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Vec<u8>> {
        self.writes.get(key)
    }

    /// Number of distinct keys staged.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Staged keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.writes.keys().map(String::as_str)
    }

    /// Consume into `(key, value)` pairs.
    pub fn into_entries(self) -> impl Iterator<Item = (String, Vec<u8>)> {
        self.writes.into_iter()
    }
}

/// Read-set and write-set of one top-level operation.
pub struct Transaction<'a> {
    store: &'a dyn EntityStore,
    reads: ReadSet,
    writes: WriteSet,
}

impl<'a> Transaction<'a> {
    /// Open a transaction against `store`.
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self {
            store,
            reads: ReadSet::new(),
            writes: WriteSet::default(),
        }
    }

    /// Read `key`, seeing this transaction's own staged writes first.
    ///
    /// The first committed read of a key records its version for validation
    /// at commit.
    pub fn get_state(&mut self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        if let Some(staged) = self.writes.get(key) {
            return Ok(Some(staged.clone()));
        }
        let found = self.store.get(key)?;
        self.reads
            .entry(key.to_string())
            .or_insert_with(|| found.as_ref().map(|v| v.version));
        Ok(found.map(|v| v.value))
    }

    /// Stage `value` at `key`.
    pub fn put_state(&mut self, key: &str, value: Vec<u8>) {
        self.writes.insert(key, value);
    }

    /// Read and decode a JSON record.
    pub fn get_json<T: DeserializeOwned>(&mut self, key: &str) -> LedgerResult<Option<T>> {
        match self.get_state(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode and stage a JSON record.
    pub fn put_json<T: Serialize>(&mut self, key: &str, record: &T) -> LedgerResult<()> {
        let bytes = serde_json::to_vec(record)?;
        self.put_state(key, bytes);
        Ok(())
    }

    /// Run a rich query against committed state.
    ///
    /// Query results are not added to the read-set and do not include this
    /// transaction's staged writes.
    pub fn rich_query(&self, selector: &Selector) -> LedgerResult<Vec<(String, Vec<u8>)>> {
        self.store.rich_query(selector)
    }

    /// Keys staged so far.
    pub fn pending_writes(&self) -> &WriteSet {
        &self.writes
    }

    /// Validate the read-set and apply every staged write as one unit.
    ///
    /// Returns the ledger version after the commit.
    pub fn commit(self) -> LedgerResult<u64> {
        self.store.commit(&self.reads, self.writes)
    }
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("reads", &self.reads)
            .field("writes", &self.writes.keys().collect::<Vec<_>>())
            .finish()
    }
}
