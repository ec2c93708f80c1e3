//! Shared fixtures: a network over a fresh ledger and one identity per role.

#![allow(dead_code)]

use lran_ledger::{InvocationContext, MemoryLedger};
use lran_registry::PartyRole;
use lran_workflow::{Network, NetworkConfig};

pub fn citizen() -> InvocationContext {
    InvocationContext::new("CitizenMSP", "ca.citizen.lran.com", "C1")
}

pub fn lawyer() -> InvocationContext {
    InvocationContext::new("LawyerMSP", "ca.lawyer.lran.com", "LW1")
}

pub fn officer() -> InvocationContext {
    InvocationContext::new("RegistryOfficeMSP", "ca.registryoffice.lran.com", "RO1")
}

pub fn authority() -> InvocationContext {
    InvocationContext::new("BLROMSP", "ca.blro.lran.com", "BL1")
}

pub fn network_with(config: &NetworkConfig) -> (Network, MemoryLedger) {
    let ledger = MemoryLedger::new();
    (Network::with_memory_ledger(ledger.clone(), config), ledger)
}

pub fn network() -> (Network, MemoryLedger) {
    network_with(&NetworkConfig::default())
}

/// Register LW1, RO1, BL1 and parcel L1 owned by "Jane Smith".
pub fn seed(net: &Network) {
    net.create_party(&lawyer(), PartyRole::Lawyer, "LW1", "Ada", "CIT-1")
        .unwrap();
    net.create_party(&officer(), PartyRole::RegistryOfficer, "RO1", "Rui", "CIT-2")
        .unwrap();
    net.create_party(&authority(), PartyRole::Authority, "BL1", "North", "North office")
        .unwrap();
    net.create_land(&authority(), "L1", "1 High St", "Jane Smith", "20230101")
        .unwrap();
}

/// Version and entries of the ledger, ignoring the snapshot timestamp.
pub fn image(ledger: &MemoryLedger) -> serde_json::Value {
    let snap = ledger.snapshot().unwrap();
    serde_json::json!({
        "version": snap.version,
        "entries": serde_json::to_value(&snap.entries).unwrap(),
    })
}
