//! # Land Registry
//!
//! Land parcels with an append-only ownership history. Only the Authority
//! role creates or transfers parcels; reads and owner searches are open.
//!
//! ## Invariants
//!
//! - `history` is never empty. Its first entry is the synthetic creation
//!   record (previous owner `"Authority"`, request `"Land Created By BLRO"`).
//! - `owner` always equals `new_owner` of the last history entry.
//! - Each entry's `previous_owner` equals the prior entry's `new_owner`.

use lran_core::{require_non_empty, CallerIdentity, DayNumber, LedgerError, LedgerResult, Role};
use lran_ledger::{Selector, Transaction};
use serde::{Deserialize, Serialize};

use crate::authorization::AuthorizationGate;

/// Value of the `Type` field on every land record.
pub const LAND_RECORD_TYPE: &str = "LAND";

/// Previous owner recorded on a parcel's creation entry.
pub const CREATION_PREVIOUS_OWNER: &str = "Authority";

/// Request id recorded on a parcel's creation entry.
pub const CREATION_REQUEST_ID: &str = "Land Created By BLRO";

const KEY_PREFIX: &str = "land-";
const KIND: &str = "land";

/// Ledger key for parcel `id`.
pub fn land_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// One ownership change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Owner before the change.
    #[serde(rename = "PreviousOwner")]
    pub previous_owner: String,
    /// Owner after the change.
    #[serde(rename = "NewOwner")]
    pub new_owner: String,
    /// Day of the change.
    #[serde(rename = "TransferDate")]
    pub transfer_date: DayNumber,
    /// Transfer request that caused the change.
    #[serde(rename = "TransferRequest")]
    pub request_id: String,
    /// Subject of the authority identity that recorded it.
    #[serde(rename = "RecordedBy")]
    pub recorded_by: String,
}

/// A land parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandParcel {
    /// Parcel id.
    #[serde(rename = "ID")]
    pub id: String,
    /// Street address.
    #[serde(rename = "Address")]
    pub address: String,
    /// Current owner.
    #[serde(rename = "Owner")]
    pub owner: String,
    /// Ownership history, oldest first.
    #[serde(rename = "History")]
    pub history: Vec<HistoryEntry>,
    /// Always [`LAND_RECORD_TYPE`].
    #[serde(rename = "Type")]
    pub record_type: String,
}

impl LandParcel {
    /// A freshly registered parcel with its synthetic creation entry.
    pub fn new(id: &str, address: &str, owner: &str, date: DayNumber, recorded_by: &str) -> Self {
        Self {
            id: id.to_string(),
            address: address.to_string(),
            owner: owner.to_string(),
            history: vec![HistoryEntry {
                previous_owner: CREATION_PREVIOUS_OWNER.to_string(),
                new_owner: owner.to_string(),
                transfer_date: date,
                request_id: CREATION_REQUEST_ID.to_string(),
                recorded_by: recorded_by.to_string(),
            }],
            record_type: LAND_RECORD_TYPE.to_string(),
        }
    }

    /// Append a transfer to `new_owner` and make them the owner.
    pub fn transfer(&mut self, new_owner: &str, date: DayNumber, request_id: &str, recorded_by: &str) {
        self.history.push(HistoryEntry {
            previous_owner: std::mem::replace(&mut self.owner, new_owner.to_string()),
            new_owner: new_owner.to_string(),
            transfer_date: date,
            request_id: request_id.to_string(),
            recorded_by: recorded_by.to_string(),
        });
    }
}

/// Registry of land parcels.
#[derive(Debug, Clone)]
pub struct LandRegistry {
    gate: AuthorizationGate,
}

impl LandRegistry {
    /// Registry authorizing through `gate`.
    pub fn new(gate: AuthorizationGate) -> Self {
        Self { gate }
    }

    /// Register a new parcel. Authority only.
    pub fn create_land(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        address: &str,
        owner: &str,
        date: &str,
    ) -> LedgerResult<LandParcel> {
        self.gate.require(Role::Authority, caller)?;
        require_non_empty(&[id, address, owner, date])?;
        let date = DayNumber::parse(date)?;

        let key = land_key(id);
        if tx.get_state(&key)?.is_some() {
            return Err(LedgerError::AlreadyExists {
                kind: KIND,
                id: id.to_string(),
            });
        }

        let parcel = LandParcel::new(id, address, owner, date, &caller.subject);
        tx.put_json(&key, &parcel)?;
        tracing::info!(id, owner, caller = %caller.subject, "land created");
        Ok(parcel)
    }

    /// Read a parcel. No authorization.
    pub fn read_land(&self, tx: &mut Transaction<'_>, id: &str) -> LedgerResult<LandParcel> {
        require_non_empty(&[id])?;
        self.load(tx, id)
    }

    /// Transfer a parcel to `new_owner`. Authority only.
    pub fn transfer_land(
        &self,
        tx: &mut Transaction<'_>,
        caller: &CallerIdentity,
        id: &str,
        new_owner: &str,
        date: &str,
        request_id: &str,
    ) -> LedgerResult<LandParcel> {
        self.gate.require(Role::Authority, caller)?;
        require_non_empty(&[id, new_owner, date, request_id])?;
        let date = DayNumber::parse(date)?;

        let mut parcel = self.load(tx, id)?;
        parcel.transfer(new_owner, date, request_id, &caller.subject);
        tx.put_json(&land_key(id), &parcel)?;
        tracing::info!(
            id,
            new_owner,
            request_id,
            history_len = parcel.history.len(),
            "land transferred"
        );
        Ok(parcel)
    }

    /// Parcels whose owner contains `owner_substring`, ignoring case, in
    /// store order. No authorization.
    pub fn search_lands_by_owner(
        &self,
        tx: &Transaction<'_>,
        owner_substring: &str,
    ) -> LedgerResult<Vec<(String, LandParcel)>> {
        require_non_empty(&[owner_substring])?;
        let selector = Selector::field_eq("Type", LAND_RECORD_TYPE)
            .and(Selector::field_contains_ignore_case("Owner", owner_substring)?);

        tx.rich_query(&selector)?
            .into_iter()
            .map(|(key, bytes)| -> LedgerResult<(String, LandParcel)> {
                Ok((key, serde_json::from_slice(&bytes)?))
            })
            .collect()
    }

    fn load(&self, tx: &mut Transaction<'_>, id: &str) -> LedgerResult<LandParcel> {
        tx.get_json(&land_key(id))?.ok_or_else(|| LedgerError::NotFound {
            kind: KIND,
            id: id.to_string(),
        })
    }
}
