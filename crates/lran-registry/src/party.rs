//! # Party Registry
//!
//! One registry shape serves all three custodial roles. A
//! [`PartyRegistry`] is parameterized by its [`PartyRole`], which fixes
//!
//! - the ledger key namespace (`lawyer-`, `registryofficer-`, `blro-`),
//! - who may create records (the party's own role),
//! - who may register a case on a party (the upstream handoff role).
//!
//! Completing a case requires the Authority role in every registry.
//!
//! ## Case bookkeeping
//!
//! `complete_case` drops every occurrence of the case from the active list
//! and then appends it to the completed list unconditionally. Completing a
//! case that was never active, or completing it twice, still appends; the
//! completed list can therefore hold duplicates. Records written by earlier
//! deployments rely on this, so it is kept.

use lran_core::{require_non_empty, CallerIdentity, LedgerError, LedgerResult, Role};
use lran_ledger::Transaction;
use serde::{Deserialize, Serialize};

use crate::authorization::AuthorizationGate;

/// The three roles that hold case-assignment records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyRole {
    /// Legal representatives.
    Lawyer,
    /// Registry clerks.
    RegistryOfficer,
    /// Issuing authority officers.
    Authority,
}

impl PartyRole {
    /// All party roles in custody order.
    pub const ALL: [PartyRole; 3] = [
        PartyRole::Lawyer,
        PartyRole::RegistryOfficer,
        PartyRole::Authority,
    ];

    /// The caller role this registry belongs to.
    pub fn role(&self) -> Role {
        match self {
            Self::Lawyer => Role::Lawyer,
            Self::RegistryOfficer => Role::RegistryOfficer,
            Self::Authority => Role::Authority,
        }
    }

    /// The role allowed to register cases on parties of this role.
    pub fn upstream(&self) -> Role {
        match self {
            Self::Lawyer => Role::Citizen,
            Self::RegistryOfficer => Role::Lawyer,
            Self::Authority => Role::RegistryOfficer,
        }
    }

    /// Ledger key prefix.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Self::Lawyer => "lawyer-",
            Self::RegistryOfficer => "registryofficer-",
            Self::Authority => "blro-",
        }
    }

    /// Record kind used in error messages and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lawyer => "lawyer",
            Self::RegistryOfficer => "registry officer",
            Self::Authority => "authority",
        }
    }

    /// Ledger key for party `id`.
    pub fn key(&self, id: &str) -> String {
        format!("{}{id}", self.key_prefix())
    }
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.role(), f)
    }
}

/// A party and the cases assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRecord {
    /// Party id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Role-specific secondary id (citizen id for lawyers and officers,
    /// description for authorities).
    #[serde(rename = "SecondaryID")]
    pub secondary_id: String,
    /// Cases currently assigned, in assignment order.
    #[serde(rename = "ActiveCases", default)]
    pub active_cases: Vec<String>,
    /// Cases finished, in completion order.
    #[serde(rename = "CompletedCases", default)]
    pub completed_cases: Vec<String>,
}

impl PartyRecord {
    /// A party with no cases.
    pub fn new(id: impl Into<String>, name: impl Into<String>, secondary_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            secondary_id: secondary_id.into(),
            active_cases: Vec::new(),
            completed_cases: Vec::new(),
        }
    }

    /// Assign `case_id`.
    pub fn add_case(&mut self, case_id: &str) {
        self.active_cases.push(case_id.to_string());
    }

    /// Remove every active occurrence of `case_id`, then record it as
    /// completed whether or not it was active.
    pub fn complete_case(&mut self, case_id: &str) {
        self.active_cases.retain(|c| c != case_id);
        self.completed_cases.push(case_id.to_string());
    }
}

/// Registry of parties for one [`PartyRole`].
#[derive(Debug, Clone)]
pub struct PartyRegistry {
    role: PartyRole,
    gate: AuthorizationGate,
}

impl PartyRegistry {
    /// Registry for `role`, authorizing through `gate`.
    pub fn new(role: PartyRole, gate: AuthorizationGate) -> Self {
        Self { role, gate }
    }

    /// The role this registry serves.
    pub fn role(&self) -> PartyRole {
        self.role
    }

    /// Create a party. Only callers acting as this registry's role may.
    pub fn create(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        name: &str,
        secondary_id: &str,
    ) -> LedgerResult<PartyRecord> {
        self.gate.require(self.role.role(), caller)?;
        require_non_empty(&[id, name, secondary_id])?;

        let key = self.role.key(id);
        if tx.get_state(&key)?.is_some() {
            return Err(LedgerError::AlreadyExists {
                kind: self.role.kind(),
                id: id.to_string(),
            });
        }

        let record = PartyRecord::new(id, name, secondary_id);
        tx.put_json(&key, &record)?;
        tracing::info!(registry = %self.role, id, caller = %caller.subject, "party created");
        Ok(record)
    }

    /// Read a party. No authorization.
    pub fn read(&self, tx: &mut Transaction<'_>, id: &str) -> LedgerResult<PartyRecord> {
        require_non_empty(&[id])?;
        self.load(tx, id)
    }

    /// Register `case_id` as active on party `id`. Only the upstream
    /// handoff role may.
    pub fn add_case(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        case_id: &str,
    ) -> LedgerResult<()> {
        self.gate.require(self.role.upstream(), caller)?;
        require_non_empty(&[id, case_id])?;

        let mut record = self.load(tx, id)?;
        record.add_case(case_id);
        tx.put_json(&self.role.key(id), &record)?;
        tracing::debug!(registry = %self.role, id, case_id, "case added");
        Ok(())
    }

    /// Move `case_id` from active to completed on party `id`. Authority only.
    pub fn complete_case(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        case_id: &str,
    ) -> LedgerResult<()> {
        self.gate.require(Role::Authority, caller)?;
        require_non_empty(&[id, case_id])?;

        let mut record = self.load(tx, id)?;
        record.complete_case(case_id);
        tx.put_json(&self.role.key(id), &record)?;
        tracing::debug!(registry = %self.role, id, case_id, "case completed");
        Ok(())
    }

    fn load(&self, tx: &mut Transaction<'_>, id: &str) -> LedgerResult<PartyRecord> {
        tx.get_json(&self.role.key(id))?
            .ok_or_else(|| LedgerError::NotFound {
                kind: self.role.kind(),
                id: id.to_string(),
            })
    }
}
