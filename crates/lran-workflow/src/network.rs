//! # Network Facade
//!
//! [`Network`] wires the registries and the transfer workflow to one
//! [`EntityStore`] and one [`IdentityResolver`], and exposes every public
//! operation.
//!
//! Each mutating operation resolves the caller, opens a [`Transaction`],
//! runs the operation together with all of its chained calls, and commits
//! once. Any error, including a commit [`LedgerError::Conflict`], leaves the
//! ledger exactly as it was. Reads resolve no identity and commit nothing.

use std::sync::Arc;

use lran_core::{CallerIdentity, LedgerResult};
use lran_ledger::{EntityStore, IdentityResolver, InvocationContext, MemoryLedger, Transaction};
use lran_registry::{
    AuthorizationGate, LandParcel, LandRegistry, PartyRecord, PartyRegistry, PartyRole, RoleTable,
};

use crate::config::NetworkConfig;
use crate::transfer::{TransferRequestRecord, TransferWorkflow};

/// The land records network.
#[derive(Clone)]
pub struct Network {
    store: Arc<dyn EntityStore>,
    resolver: Arc<dyn IdentityResolver>,
    gate: AuthorizationGate,
    lawyers: PartyRegistry,
    officers: PartyRegistry,
    authorities: PartyRegistry,
    lands: LandRegistry,
    transfers: TransferWorkflow,
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("roles", self.gate.table())
            .field("strict_stage_order", &self.transfers.strict_stage_order())
            .finish_non_exhaustive()
    }
}

impl Network {
    /// Network over `store`, resolving callers with `resolver`.
    pub fn new(
        store: Arc<dyn EntityStore>,
        resolver: Arc<dyn IdentityResolver>,
        config: &NetworkConfig,
    ) -> Self {
        let gate = AuthorizationGate::new(config.roles.clone());
        Self {
            store,
            resolver,
            lawyers: PartyRegistry::new(PartyRole::Lawyer, gate.clone()),
            officers: PartyRegistry::new(PartyRole::RegistryOfficer, gate.clone()),
            authorities: PartyRegistry::new(PartyRole::Authority, gate.clone()),
            lands: LandRegistry::new(gate.clone()),
            transfers: TransferWorkflow::new(gate.clone(), config.strict_stage_order),
            gate,
        }
    }

    /// Network over `ledger` with the certificate-context resolver.
    pub fn with_memory_ledger(ledger: MemoryLedger, config: &NetworkConfig) -> Self {
        Self::new(
            Arc::new(ledger),
            Arc::new(lran_ledger::CertificateResolver),
            config,
        )
    }

    /// The role bindings in effect.
    pub fn roles(&self) -> &RoleTable {
        self.gate.table()
    }

    fn registry(&self, role: PartyRole) -> &PartyRegistry {
        match role {
            PartyRole::Lawyer => &self.lawyers,
            PartyRole::RegistryOfficer => &self.officers,
            PartyRole::Authority => &self.authorities,
        }
    }

    /// Resolve the caller, run `op` in a fresh transaction, and commit.
    fn execute<T>(
        &self,
        operation: &'static str,
        ctx: &InvocationContext,
        op: impl FnOnce(&mut Transaction<'_>, &CallerIdentity) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let caller = self.resolver.resolve(ctx)?;
        let mut tx = Transaction::new(self.store.as_ref());
        let out = op(&mut tx, &caller).map_err(|e| {
            tracing::debug!(operation, caller = %caller, error = %e, "operation failed");
            e
        })?;
        let writes = tx.pending_writes().len();
        let version = tx.commit()?;
        tracing::debug!(operation, version, writes, "committed");
        tracing::info!(operation, caller = %caller, "operation succeeded");
        Ok(out)
    }

    /// Run a read-only `op` against committed state.
    fn query<T>(&self, op: impl FnOnce(&mut Transaction<'_>) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut tx = Transaction::new(self.store.as_ref());
        op(&mut tx)
    }

    // ─── Land ────────────────────────────────────────────────────────

    /// Register a parcel. Authority only.
    pub fn create_land(
        &self,
        ctx: &InvocationContext,
        id: &str,
        address: &str,
        owner: &str,
        date: &str,
    ) -> LedgerResult<LandParcel> {
        self.execute("createLand", ctx, |tx, caller| {
            self.lands.create_land(tx, caller, id, address, owner, date)
        })
    }

    /// Transfer a parcel. Authority only.
    pub fn transfer_land(
        &self,
        ctx: &InvocationContext,
        id: &str,
        new_owner: &str,
        date: &str,
        request_id: &str,
    ) -> LedgerResult<LandParcel> {
        self.execute("transferLand", ctx, |tx, caller| {
            self.lands
                .transfer_land(tx, caller, id, new_owner, date, request_id)
        })
    }

    /// Read a parcel.
    pub fn read_land(&self, id: &str) -> LedgerResult<LandParcel> {
        self.query(|tx| self.lands.read_land(tx, id))
    }

    /// Parcels whose owner contains `owner_substring`, ignoring case.
    pub fn search_lands_by_owner(
        &self,
        owner_substring: &str,
    ) -> LedgerResult<Vec<(String, LandParcel)>> {
        self.query(|tx| self.lands.search_lands_by_owner(tx, owner_substring))
    }

    // ─── Parties ─────────────────────────────────────────────────────

    /// Register a party in `role`'s registry.
    pub fn create_party(
        &self,
        ctx: &InvocationContext,
        role: PartyRole,
        id: &str,
        name: &str,
        secondary_id: &str,
    ) -> LedgerResult<PartyRecord> {
        self.execute("createParty", ctx, |tx, caller| {
            self.registry(role).create(tx, caller, id, name, secondary_id)
        })
    }

    /// Read a party from `role`'s registry.
    pub fn read_party(&self, role: PartyRole, id: &str) -> LedgerResult<PartyRecord> {
        self.query(|tx| self.registry(role).read(tx, id))
    }

    /// Assign a case to a party directly.
    pub fn add_case(
        &self,
        ctx: &InvocationContext,
        role: PartyRole,
        id: &str,
        case_id: &str,
    ) -> LedgerResult<()> {
        self.execute("addCase", ctx, |tx, caller| {
            self.registry(role).add_case(tx, caller, id, case_id)
        })
    }

    /// Complete a case on a party directly.
    pub fn complete_case(
        &self,
        ctx: &InvocationContext,
        role: PartyRole,
        id: &str,
        case_id: &str,
    ) -> LedgerResult<()> {
        self.execute("completeCase", ctx, |tx, caller| {
            self.registry(role).complete_case(tx, caller, id, case_id)
        })
    }

    // ─── Transfer requests ───────────────────────────────────────────

    /// Open a transfer request. Citizen only.
    pub fn create_transfer_request(
        &self,
        ctx: &InvocationContext,
        id: &str,
        land_id: &str,
        lawyer_id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.execute("createTransferRequest", ctx, |tx, caller| {
            self.transfers.create(tx, caller, id, land_id, lawyer_id, date)
        })
    }

    /// Forward a request to a registry officer. Lawyer only.
    pub fn advance_to_registry_officer(
        &self,
        ctx: &InvocationContext,
        id: &str,
        officer_id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.execute("advanceToRegistryOfficer", ctx, |tx, caller| {
            self.transfers
                .advance_to_registry_officer(tx, caller, id, officer_id, date)
        })
    }

    /// Forward a request to an authority. Registry officer only.
    pub fn advance_to_authority(
        &self,
        ctx: &InvocationContext,
        id: &str,
        authority_id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.execute("advanceToAuthority", ctx, |tx, caller| {
            self.transfers
                .advance_to_authority(tx, caller, id, authority_id, date)
        })
    }

    /// Approve a request. Authority only.
    pub fn approve_transfer_request(
        &self,
        ctx: &InvocationContext,
        id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.execute("approveTransferRequest", ctx, |tx, caller| {
            self.transfers.approve(tx, caller, id, date)
        })
    }

    /// Read a request.
    pub fn read_transfer_request(&self, id: &str) -> LedgerResult<TransferRequestRecord> {
        self.query(|tx| self.transfers.read(tx, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lran_core::LedgerError;

    fn network() -> (Network, MemoryLedger) {
        let ledger = MemoryLedger::new();
        (
            Network::with_memory_ledger(ledger.clone(), &NetworkConfig::default()),
            ledger,
        )
    }

    fn authority() -> InvocationContext {
        InvocationContext::new("BLROMSP", "ca.blro.lran.com", "BL1")
    }

    #[test]
    fn unresolvable_caller_touches_nothing() {
        let (net, ledger) = network();
        let err = net
            .create_land(&InvocationContext::anonymous(), "L1", "addr", "Jane", "1")
            .unwrap_err();
        assert!(matches!(err, LedgerError::Identity(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn each_operation_commits_once() {
        let (net, ledger) = network();
        net.create_land(&authority(), "L1", "addr", "Jane", "1").unwrap();
        assert_eq!(ledger.version(), 1);
        net.transfer_land(&authority(), "L1", "Bob", "2", "T1").unwrap();
        assert_eq!(ledger.version(), 2);
        assert_eq!(net.read_land("L1").unwrap().owner, "Bob");
        assert_eq!(ledger.version(), 2);
    }

    #[test]
    fn reads_need_no_identity() {
        let (net, _ledger) = network();
        net.create_party(&authority(), PartyRole::Authority, "BL1", "Office", "North")
            .unwrap();
        let record = net.read_party(PartyRole::Authority, "BL1").unwrap();
        assert_eq!(record.name, "Office");
        assert!(matches!(
            net.read_party(PartyRole::Lawyer, "BL1"),
            Err(LedgerError::NotFound { kind: "lawyer", .. })
        ));
    }

    #[test]
    fn configured_roles_are_used() {
        let config = NetworkConfig {
            roles: RoleTable::default().with(
                lran_core::Role::Authority,
                lran_registry::RoleCredential::new("OtherMSP", "ca.other"),
            ),
            strict_stage_order: false,
        };
        let net = Network::with_memory_ledger(MemoryLedger::new(), &config);
        assert!(net.create_land(&authority(), "L1", "a", "o", "1").is_err());
        let other = InvocationContext::new("OtherMSP", "ca.other", "X");
        assert!(net.create_land(&other, "L1", "a", "o", "1").is_ok());
    }
}
