//! # lran-registry: Role-Gated Registries
//!
//! The record-owning components of the network. Each registry exclusively
//! owns one key namespace on the ledger and performs all of its reads and
//! writes through a caller-supplied [`lran_ledger::Transaction`], so a
//! registry operation invoked as a chained call commits together with the
//! operation that invoked it.
//!
//! - **Authorization** (`authorization.rs`): [`RoleTable`] and the single
//!   [`AuthorizationGate`] every mutating operation consults first.
//! - **Parties** (`party.rs`): one generic [`PartyRegistry`], instantiated
//!   for lawyers, registry officers, and authorities.
//! - **Land** (`land.rs`): [`LandRegistry`], parcels and ownership history.
//!
//! Identities arrive as explicit arguments. A registry never looks up who
//! is calling it; it checks whoever it is told is calling.

pub mod authorization;
pub mod land;
pub mod party;

pub use authorization::{AuthorizationGate, RoleCredential, RoleTable};
pub use land::{land_key, HistoryEntry, LandParcel, LandRegistry, LAND_RECORD_TYPE};
pub use party::{PartyRecord, PartyRegistry, PartyRole};
