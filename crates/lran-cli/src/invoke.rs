//! # Invoke Subcommand
//!
//! Loads the ledger snapshot, runs one contract function through the
//! network dispatcher, prints any returned record as pretty JSON, and writes
//! the snapshot back if the ledger changed. A failed invocation leaves the
//! file untouched.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use lran_ledger::{CertificateInfo, InvocationContext};
use lran_workflow::{Contract, Network, NetworkConfig};

use crate::snapshot;

/// Arguments for `lran invoke`.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Member organization (MSP) id to invoke as.
    #[arg(long)]
    pub msp: Option<String>,

    /// Certificate issuer common name.
    #[arg(long)]
    pub issuer: Option<String>,

    /// Certificate subject common name.
    #[arg(long)]
    pub subject: Option<String>,

    /// Contract: land, lawyer, registryoffice, blro, or transfer.
    pub contract: String,

    /// Function name (e.g. createLand, transfer2BLRO).
    pub function: String,

    /// Positional function arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl InvokeArgs {
    /// The invocation context these flags describe.
    pub fn context(&self) -> InvocationContext {
        let certificate = match (&self.issuer, &self.subject) {
            (None, None) => None,
            (issuer, subject) => Some(CertificateInfo {
                issuer_cn: issuer.clone().unwrap_or_default(),
                subject_cn: subject.clone().unwrap_or_default(),
            }),
        };
        InvocationContext {
            msp_id: self.msp.clone(),
            certificate,
        }
    }
}

/// Run one invocation against the snapshot at `ledger_path`, returning the
/// printed payload.
pub fn invoke(
    args: &InvokeArgs,
    ledger_path: &Path,
    config: &NetworkConfig,
) -> Result<Option<serde_json::Value>> {
    let contract: Contract = args.contract.parse()?;
    let ledger = snapshot::load(ledger_path)?;
    let before = ledger.version();
    let network = Network::with_memory_ledger(ledger.clone(), config);

    let payload = network
        .invoke(&args.context(), contract, &args.function, &args.args)
        .with_context(|| format!("{contract}.{} failed", args.function))?;

    if ledger.version() != before {
        snapshot::save(ledger_path, &ledger)?;
    }
    Ok(payload)
}

/// Entry point for `lran invoke`.
pub fn run_invoke(args: &InvokeArgs, ledger_path: &Path, config: &NetworkConfig) -> Result<u8> {
    if let Some(payload) = invoke(args, ledger_path, config)? {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lran_core::LedgerError;

    fn as_role(msp: &str, issuer: &str, subject: &str, contract: &str, function: &str, args: &[&str]) -> InvokeArgs {
        InvokeArgs {
            msp: Some(msp.into()),
            issuer: Some(issuer.into()),
            subject: Some(subject.into()),
            contract: contract.into(),
            function: function.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn authority(contract: &str, function: &str, args: &[&str]) -> InvokeArgs {
        as_role("BLROMSP", "ca.blro.lran.com", "BL1", contract, function, args)
    }

    fn anonymous(contract: &str, function: &str, args: &[&str]) -> InvokeArgs {
        InvokeArgs {
            msp: None,
            issuer: None,
            subject: None,
            contract: contract.into(),
            function: function.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn state_persists_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let config = NetworkConfig::default();

        invoke(&authority("land", "createLand", &["L1", "1 High St", "Jane", "20230101"]), &path, &config)
            .unwrap();
        invoke(&authority("land", "transferLand", &["L1", "Bob", "20230201", "T1"]), &path, &config)
            .unwrap();

        let land = invoke(&anonymous("land", "readLand", &["L1"]), &path, &config)
            .unwrap()
            .unwrap();
        assert_eq!(land["Owner"], "Bob");
        assert_eq!(land["History"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn failed_invocation_does_not_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let config = NetworkConfig::default();

        let citizen = as_role("CitizenMSP", "ca.citizen.lran.com", "C1", "land", "createLand", &["L1", "a", "o", "1"]);
        let err = invoke(&citizen, &path, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::AccessDenied { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn reads_do_not_rewrite_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let config = NetworkConfig::default();
        invoke(&authority("land", "createLand", &["L1", "a", "o", "1"]), &path, &config).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        invoke(&anonymous("land", "getLands", &["O"]), &path, &config).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn unknown_contract_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = invoke(&anonymous("parcels", "readLand", &["L1"]), &dir.path().join("n.json"), &NetworkConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("unknown contract"));
    }
}
