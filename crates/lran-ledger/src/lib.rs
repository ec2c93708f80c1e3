//! # lran-ledger: Ledger Collaborators
//!
//! The storage and identity plumbing the registries run on. None of it knows
//! about land, parties, or transfer requests.
//!
//! ## Components
//!
//! - **Store** (`store.rs`): the [`EntityStore`] trait and [`MemoryLedger`],
//!   a versioned key/value ledger that validates read versions at commit and
//!   applies a write-set under one lock.
//! - **Transaction** (`transaction.rs`): [`Transaction`], the read-set and
//!   write-set of one top-level operation. Chained calls share it, so an
//!   operation and all of its chained writes commit together or not at all.
//! - **Query** (`query.rs`): [`Selector`], the rich-query predicate over JSON
//!   records (field equality, regex match, conjunction).
//! - **Identity** (`identity.rs`): [`IdentityResolver`] and the
//!   certificate-context resolver used by the network.
//!
//! ## Concurrency
//!
//! The workflow never takes locks of its own. Two operations touching the
//! same key are serialized by optimistic version checks at commit: the
//! second commit sees a version change and fails with `Conflict`.

pub mod identity;
pub mod query;
pub mod store;
pub mod transaction;

pub use identity::{CertificateInfo, CertificateResolver, IdentityResolver, InvocationContext};
pub use query::Selector;
pub use store::{EntityStore, LedgerSnapshot, MemoryLedger, SnapshotEntry, VersionedValue};
pub use transaction::{ReadSet, Transaction, WriteSet};
