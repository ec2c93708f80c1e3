//! # lran-workflow: Transfer Workflow and Network Facade
//!
//! Ties the ledger, the registries, and the transfer-request state machine
//! into one network.
//!
//! - **Transfer** (`transfer.rs`): [`TransferWorkflow`], the
//!   Lawyer → RegistryOfficer → Authority → complete stage machine and its
//!   chained registry calls.
//! - **Config** (`config.rs`): [`NetworkConfig`], the role table and stage
//!   ordering switch, loaded from YAML.
//! - **Network** (`network.rs`): [`Network`], every public operation run as
//!   one transaction and committed once.
//! - **Dispatch** (`dispatch.rs`): [`Contract`] and `Network::invoke`, the
//!   string-argument entry point used by the CLI.

pub mod config;
pub mod dispatch;
pub mod network;
pub mod transfer;

pub use config::{ConfigError, NetworkConfig};
pub use dispatch::Contract;
pub use network::Network;
pub use transfer::{
    request_key, Stage, StatusEntry, TransferRequestRecord, TransferWorkflow, STATUS_APPROVED,
    STATUS_CREATED, STATUS_TO_AUTHORITY, STATUS_TO_REGISTRY_OFFICER,
};
