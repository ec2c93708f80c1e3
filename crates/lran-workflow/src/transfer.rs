//! # Transfer Request Workflow
//!
//! A citizen's request to transfer a parcel moves through three custodians
//! before it is approved.
//!
//! ## States
//!
//! ```text
//! create (Citizen)
//!     │
//!     ▼
//!   Lawyer ──advance_to_registry_officer (Lawyer)──▶ RegistryOfficer
//!                                                        │
//!                              advance_to_authority (RegistryOfficer)
//!                                                        │
//!                                                        ▼
//!                       Complete ◀──approve (Authority)── Authority
//! ```
//!
//! Every transition writes the request record and then makes one or more
//! chained calls into the party registries, all inside the caller's
//! [`Transaction`]. A failed chained call is reported as
//! [`LedgerError::Downstream`]; because nothing is committed until the whole
//! operation returns, the request write is discarded with it.
//!
//! Chained calls carry the external caller's identity. `create`'s
//! `addCase` on the lawyer registry is therefore authorized as a Citizen.
//!
//! ## Stage checks
//!
//! By default no transition looks at the current stage: a request still at
//! `Lawyer` can be sent straight to `Authority`, and an approved request can
//! be approved again. With strict ordering on, each transition requires its
//! predecessor stage and an incomplete request, and fails with
//! [`LedgerError::InvalidStage`] before writing anything.
//!
//! The workflow does not check that the land id or party ids on a request
//! name existing records; only the chained `addCase`/`completeCase` calls
//! reach the party records themselves.

use lran_core::{require_non_empty, CallerIdentity, DayNumber, LedgerError, LedgerResult, Role};
use lran_ledger::Transaction;
use lran_registry::{AuthorizationGate, PartyRegistry, PartyRole};
use serde::{Deserialize, Serialize};

/// Status text appended by `create`.
pub const STATUS_CREATED: &str = "Transfer Request Created.";
/// Status text appended by `advance_to_registry_officer`.
pub const STATUS_TO_REGISTRY_OFFICER: &str = "Request forwarded to Registry Officer.";
/// Status text appended by `advance_to_authority`.
pub const STATUS_TO_AUTHORITY: &str = "Request forwarded to BLRO.";
/// Status text appended by `approve`.
pub const STATUS_APPROVED: &str = "Transfer Request Approved by BLRO.";

const KEY_PREFIX: &str = "transferRequest-";
const KIND: &str = "transfer request";

/// Ledger key for transfer request `id`.
pub fn request_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

// ─── Records ─────────────────────────────────────────────────────────

/// Custodial stage of a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// With the lawyer.
    #[serde(rename = "lawyer")]
    Lawyer,
    /// With the registry officer.
    #[serde(rename = "registry")]
    RegistryOfficer,
    /// With the issuing authority.
    #[serde(rename = "blro")]
    Authority,
}

impl Stage {
    /// Stored name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lawyer => "lawyer",
            Self::RegistryOfficer => "registry",
            Self::Authority => "blro",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a request's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Human-readable status.
    #[serde(rename = "Status")]
    pub text: String,
    /// Subject of the identity that caused it.
    #[serde(rename = "StatusCreator")]
    pub actor: String,
    /// Day of the change.
    #[serde(rename = "Date")]
    pub date: DayNumber,
}

impl StatusEntry {
    fn new(text: &str, actor: &CallerIdentity, date: DayNumber) -> Self {
        Self {
            text: text.to_string(),
            actor: actor.subject.clone(),
            date,
        }
    }
}

/// A transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequestRecord {
    /// Request id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Parcel to transfer.
    #[serde(rename = "LandID")]
    pub land_id: String,
    /// Assigned lawyer.
    #[serde(rename = "Lawyer")]
    pub lawyer_id: String,
    /// Assigned registry officer; empty until forwarded.
    #[serde(rename = "RegistryOfficer")]
    pub registry_officer_id: String,
    /// Assigned authority; empty until forwarded.
    #[serde(rename = "BLRO")]
    pub authority_id: String,
    /// Current custodian.
    #[serde(rename = "Stage")]
    pub stage: Stage,
    /// Status history, oldest first.
    #[serde(rename = "StatusHistory")]
    pub status_history: Vec<StatusEntry>,
    /// Set by approval.
    #[serde(rename = "Complete")]
    pub complete: bool,
}

// ─── Workflow ────────────────────────────────────────────────────────

/// The transfer request state machine.
#[derive(Debug, Clone)]
pub struct TransferWorkflow {
    gate: AuthorizationGate,
    lawyers: PartyRegistry,
    officers: PartyRegistry,
    authorities: PartyRegistry,
    strict_stage_order: bool,
}

impl TransferWorkflow {
    /// Workflow over the three party registries built from `gate`.
    pub fn new(gate: AuthorizationGate, strict_stage_order: bool) -> Self {
        Self {
            lawyers: PartyRegistry::new(PartyRole::Lawyer, gate.clone()),
            officers: PartyRegistry::new(PartyRole::RegistryOfficer, gate.clone()),
            authorities: PartyRegistry::new(PartyRole::Authority, gate.clone()),
            gate,
            strict_stage_order,
        }
    }

    /// Whether transitions enforce stage order.
    pub fn strict_stage_order(&self) -> bool {
        self.strict_stage_order
    }

    /// Open a request at stage `Lawyer` and register it with the lawyer.
    /// Citizen only.
    pub fn create(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        land_id: &str,
        lawyer_id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.gate.require(Role::Citizen, caller)?;
        require_non_empty(&[id, land_id, lawyer_id, date])?;
        let date = DayNumber::parse(date)?;

        let key = request_key(id);
        if tx.get_state(&key)?.is_some() {
            return Err(LedgerError::AlreadyExists {
                kind: KIND,
                id: id.to_string(),
            });
        }

        let record = TransferRequestRecord {
            id: id.to_string(),
            land_id: land_id.to_string(),
            lawyer_id: lawyer_id.to_string(),
            registry_officer_id: String::new(),
            authority_id: String::new(),
            stage: Stage::Lawyer,
            status_history: vec![StatusEntry::new(STATUS_CREATED, caller, date)],
            complete: false,
        };
        tx.put_json(&key, &record)?;

        chained(tx, "lawyer.addCase", |tx| {
            self.lawyers.add_case(tx, caller, lawyer_id, id)
        })?;
        tracing::info!(id, land_id, lawyer_id, caller = %caller.subject, "transfer request created");
        Ok(record)
    }

    /// Hand the request to registry officer `officer_id`. Lawyer only.
    pub fn advance_to_registry_officer(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        officer_id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.gate.require(Role::Lawyer, caller)?;
        require_non_empty(&[id, officer_id, date])?;
        let date = DayNumber::parse(date)?;

        let mut record = self.load(tx, id)?;
        self.check_stage(&record, Stage::Lawyer, Stage::RegistryOfficer.as_str())?;
        record.registry_officer_id = officer_id.to_string();
        record.stage = Stage::RegistryOfficer;
        record
            .status_history
            .push(StatusEntry::new(STATUS_TO_REGISTRY_OFFICER, caller, date));
        tx.put_json(&request_key(id), &record)?;

        chained(tx, "registryoffice.addCase", |tx| {
            self.officers.add_case(tx, caller, officer_id, id)
        })?;
        tracing::info!(id, officer_id, caller = %caller.subject, "transfer request forwarded to registry officer");
        Ok(record)
    }

    /// Hand the request to authority `authority_id`. Registry officer only.
    pub fn advance_to_authority(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        authority_id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.gate.require(Role::RegistryOfficer, caller)?;
        require_non_empty(&[id, authority_id, date])?;
        let date = DayNumber::parse(date)?;

        let mut record = self.load(tx, id)?;
        self.check_stage(&record, Stage::RegistryOfficer, Stage::Authority.as_str())?;
        record.authority_id = authority_id.to_string();
        record.stage = Stage::Authority;
        record
            .status_history
            .push(StatusEntry::new(STATUS_TO_AUTHORITY, caller, date));
        tx.put_json(&request_key(id), &record)?;

        chained(tx, "blro.addCase", |tx| {
            self.authorities.add_case(tx, caller, authority_id, id)
        })?;
        tracing::info!(id, authority_id, caller = %caller.subject, "transfer request forwarded to authority");
        Ok(record)
    }

    /// Mark the request complete and close the case on the authority,
    /// registry officer, and lawyer, in that order. Authority only.
    ///
    /// Approval does not transfer the parcel; that is a separate
    /// `transferLand` by the authority.
    pub fn approve(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        date: &str,
    ) -> LedgerResult<TransferRequestRecord> {
        self.gate.require(Role::Authority, caller)?;
        require_non_empty(&[id, date])?;
        let date = DayNumber::parse(date)?;

        let mut record = self.load(tx, id)?;
        self.check_stage(&record, Stage::Authority, "complete")?;
        record.complete = true;
        record
            .status_history
            .push(StatusEntry::new(STATUS_APPROVED, caller, date));
        tx.put_json(&request_key(id), &record)?;

        chained(tx, "blro.completeCase", |tx| {
            self.authorities.complete_case(tx, caller, &record.authority_id, id)
        })?;
        chained(tx, "registryoffice.completeCase", |tx| {
            self.officers
                .complete_case(tx, caller, &record.registry_officer_id, id)
        })?;
        chained(tx, "lawyer.completeCase", |tx| {
            self.lawyers.complete_case(tx, caller, &record.lawyer_id, id)
        })?;
        tracing::info!(id, caller = %caller.subject, "transfer request approved");
        Ok(record)
    }

    /// Read a request. No authorization.
    pub fn read(&self, tx: &mut Transaction<'_>, id: &str) -> LedgerResult<TransferRequestRecord> {
        require_non_empty(&[id])?;
        self.load(tx, id)
    }

    fn load(&self, tx: &mut Transaction<'_>, id: &str) -> LedgerResult<TransferRequestRecord> {
        tx.get_json(&request_key(id))?.ok_or_else(|| LedgerError::NotFound {
            kind: KIND,
            id: id.to_string(),
        })
    }

    fn check_stage(&self, record: &TransferRequestRecord, expected: Stage, to: &str) -> LedgerResult<()> {
        if !self.strict_stage_order {
            return Ok(());
        }
        if record.complete {
            return Err(LedgerError::InvalidStage {
                id: record.id.clone(),
                from: "complete".into(),
                to: to.into(),
            });
        }
        if record.stage != expected {
            return Err(LedgerError::InvalidStage {
                id: record.id.clone(),
                from: record.stage.to_string(),
                to: to.into(),
            });
        }
        Ok(())
    }
}

/// Run a chained registry call, reporting its failure as a failure of
/// `target`.
fn chained<T>(
    tx: &mut Transaction<'_>,
    target: &'static str,
    call: impl FnOnce(&mut Transaction<'_>) -> LedgerResult<T>,
) -> LedgerResult<T> {
    tracing::debug!(call = target, "chained call");
    call(tx).map_err(|e| {
        tracing::debug!(call = target, error = %e, "chained call failed");
        e.downstream(target)
    })
}
