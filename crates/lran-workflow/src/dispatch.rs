//! # Invocation Dispatcher
//!
//! String-addressed entry point: a contract name, a function name, and
//! positional string arguments, as ledger clients submit them. Argument
//! count is checked here before the operation runs; everything else is the
//! typed operation's job.
//!
//! Reads return the record as JSON, searches return
//! `[{"Key": ..., "Record": ...}]`, and mutations return no payload.

use std::str::FromStr;

use lran_core::{expect_args, LedgerError, LedgerResult};
use lran_ledger::InvocationContext;
use lran_registry::PartyRole;
use serde::Serialize;
use serde_json::{json, Value};

use crate::network::Network;

/// The deployed contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    /// Land parcels.
    Land,
    /// Lawyer registry.
    Lawyer,
    /// Registry officer registry.
    RegistryOffice,
    /// Authority registry.
    Blro,
    /// Transfer requests.
    Transfer,
}

impl Contract {
    /// Every contract.
    pub const ALL: [Contract; 5] = [
        Self::Land,
        Self::Lawyer,
        Self::RegistryOffice,
        Self::Blro,
        Self::Transfer,
    ];

    /// Deployed name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Lawyer => "lawyer",
            Self::RegistryOffice => "registryoffice",
            Self::Blro => "blro",
            Self::Transfer => "transfer",
        }
    }

    /// The party registry this contract fronts, if it is one.
    pub fn party_role(&self) -> Option<PartyRole> {
        match self {
            Self::Lawyer => Some(PartyRole::Lawyer),
            Self::RegistryOffice => Some(PartyRole::RegistryOfficer),
            Self::Blro => Some(PartyRole::Authority),
            Self::Land | Self::Transfer => None,
        }
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Contract {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| LedgerError::Argument(format!("unknown contract {s:?}")))
    }
}

fn unknown(contract: Contract, function: &str) -> LedgerError {
    LedgerError::UnknownFunction {
        contract: contract.to_string(),
        function: function.to_string(),
    }
}

fn payload<T: Serialize>(record: &T) -> LedgerResult<Option<Value>> {
    Ok(Some(serde_json::to_value(record)?))
}

impl Network {
    /// Invoke `function` on `contract` with positional `args`.
    pub fn invoke(
        &self,
        ctx: &InvocationContext,
        contract: Contract,
        function: &str,
        args: &[String],
    ) -> LedgerResult<Option<Value>> {
        tracing::debug!(%contract, function, argc = args.len(), "invoke");
        match contract.party_role() {
            Some(role) => self.invoke_party(ctx, contract, role, function, args),
            None if contract == Contract::Land => self.invoke_land(ctx, function, args),
            None => self.invoke_transfer(ctx, function, args),
        }
    }

    fn invoke_land(
        &self,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> LedgerResult<Option<Value>> {
        match function {
            "createLand" => {
                let [id, address, owner, date] = expect_args(args)?;
                self.create_land(ctx, id, address, owner, date)?;
                Ok(None)
            }
            "transferLand" => {
                let [id, new_owner, date, request_id] = expect_args(args)?;
                self.transfer_land(ctx, id, new_owner, date, request_id)?;
                Ok(None)
            }
            "readLand" => {
                let [id] = expect_args(args)?;
                payload(&self.read_land(id)?)
            }
            "searchLandsByOwner" | "getLands" => {
                let [owner] = expect_args(args)?;
                let hits: Vec<Value> = self
                    .search_lands_by_owner(owner)?
                    .into_iter()
                    .map(|(key, record)| json!({ "Key": key, "Record": record }))
                    .collect();
                Ok(Some(Value::Array(hits)))
            }
            _ => Err(unknown(Contract::Land, function)),
        }
    }

    fn invoke_party(
        &self,
        ctx: &InvocationContext,
        contract: Contract,
        role: PartyRole,
        function: &str,
        args: &[String],
    ) -> LedgerResult<Option<Value>> {
        let (create, read) = match role {
            PartyRole::Lawyer => ("createLawyer", "readLawyer"),
            PartyRole::RegistryOfficer => ("createRegistryOfficer", "readRegistryOfficer"),
            PartyRole::Authority => ("createBLRO", "readBLRO"),
        };
        match function {
            f if f == create || f == "createParty" => {
                let [id, name, secondary_id] = expect_args(args)?;
                self.create_party(ctx, role, id, name, secondary_id)?;
                Ok(None)
            }
            f if f == read || f == "readParty" => {
                let [id] = expect_args(args)?;
                payload(&self.read_party(role, id)?)
            }
            "addCase" => {
                let [id, case_id] = expect_args(args)?;
                self.add_case(ctx, role, id, case_id)?;
                Ok(None)
            }
            "completeCase" => {
                let [id, case_id] = expect_args(args)?;
                self.complete_case(ctx, role, id, case_id)?;
                Ok(None)
            }
            _ => Err(unknown(contract, function)),
        }
    }

    fn invoke_transfer(
        &self,
        ctx: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> LedgerResult<Option<Value>> {
        match function {
            "createTransferRequest" => {
                let [id, land_id, lawyer_id, date] = expect_args(args)?;
                self.create_transfer_request(ctx, id, land_id, lawyer_id, date)?;
                Ok(None)
            }
            "advanceToRegistryOfficer" | "transfer2RegistryOfficer" => {
                let [id, officer_id, date] = expect_args(args)?;
                self.advance_to_registry_officer(ctx, id, officer_id, date)?;
                Ok(None)
            }
            "advanceToAuthority" | "transfer2BLRO" => {
                let [id, authority_id, date] = expect_args(args)?;
                self.advance_to_authority(ctx, id, authority_id, date)?;
                Ok(None)
            }
            "approveTransferRequest" => {
                let [id, date] = expect_args(args)?;
                self.approve_transfer_request(ctx, id, date)?;
                Ok(None)
            }
            "readTransferRequest" => {
                let [id] = expect_args(args)?;
                payload(&self.read_transfer_request(id)?)
            }
            _ => Err(unknown(Contract::Transfer, function)),
        }
    }
}
