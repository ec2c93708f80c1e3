//! # Land Routes
//!
//! - `GET /api/main/land/get/{id}`: read a parcel
//! - `GET /api/main/land/queryOwner/{owner}`: parcels by owner substring
//! - `POST /api/main/land/createLand`: register a parcel (Authority)
//! - `POST /api/main/land/transferLand`: transfer a parcel (Authority)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lran_registry::LandParcel;
use serde::{Deserialize, Serialize};

use super::Accepted;
use crate::error::AppError;
use crate::extractors::{extract_payload, DateField, Envelope};
use crate::identity::Invoker;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Payload of `createLand`.
#[derive(Debug, Deserialize)]
pub struct CreateLandPayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Owner")]
    pub owner: String,
    #[serde(rename = "Date")]
    pub date: DateField,
}

/// Payload of `transferLand`.
#[derive(Debug, Deserialize)]
pub struct TransferLandPayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "NewOwner")]
    pub new_owner: String,
    #[serde(rename = "Date")]
    pub date: DateField,
    #[serde(rename = "TransferRequest")]
    pub request_id: String,
}

/// One owner-search hit.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: LandParcel,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/main/land/get/{id}", get(read_land))
        .route("/api/main/land/queryOwner/{owner}", get(query_owner))
        .route("/api/main/land/createLand", post(create_land))
        .route("/api/main/land/transferLand", post(transfer_land))
}

// ── Handlers ────────────────────────────────────────────────────────

async fn read_land(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LandParcel>, AppError> {
    Ok(Json(state.network.read_land(&id)?))
}

async fn query_owner(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let hits = state
        .network
        .search_lands_by_owner(&owner)?
        .into_iter()
        .map(|(key, record)| SearchHit { key, record })
        .collect();
    Ok(Json(hits))
}

async fn create_land(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<CreateLandPayload>>, JsonRejection>,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .create_land(&ctx, &p.id, &p.address, &p.owner, &p.date.to_arg())?;
    Ok(Json(Accepted::new("Land has been successfully added!", p.id)))
}

async fn transfer_land(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<TransferLandPayload>>, JsonRejection>,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .transfer_land(&ctx, &p.id, &p.new_owner, &p.date.to_arg(), &p.request_id)?;
    Ok(Json(Accepted::new("Land has been successfully transferred!", p.id)))
}
