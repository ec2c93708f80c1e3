//! # Transfer Request Routes
//!
//! - `GET /api/main/transfer/get/{id}`: read a request
//! - `POST /api/main/transfer/createTransferRequest`: open (Citizen)
//! - `POST /api/main/transfer/transfer2RegistryOfficer`: forward (Lawyer)
//! - `POST /api/main/transfer/transfer2BLRO`: forward (RegistryOfficer)
//! - `POST /api/main/transfer/approveTransferRequest`: approve (Authority)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lran_workflow::TransferRequestRecord;
use serde::Deserialize;

use super::Accepted;
use crate::error::AppError;
use crate::extractors::{extract_payload, DateField, Envelope};
use crate::identity::Invoker;
use crate::state::AppState;

// ── Request DTOs ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateRequestPayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "LandID")]
    pub land_id: String,
    #[serde(rename = "Lawyer")]
    pub lawyer_id: String,
    #[serde(rename = "Date")]
    pub date: DateField,
}

#[derive(Debug, Deserialize)]
pub struct ForwardToOfficerPayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "RegistryOfficer")]
    pub officer_id: String,
    #[serde(rename = "Date")]
    pub date: DateField,
}

#[derive(Debug, Deserialize)]
pub struct ForwardToAuthorityPayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "BLRO")]
    pub authority_id: String,
    #[serde(rename = "Date")]
    pub date: DateField,
}

#[derive(Debug, Deserialize)]
pub struct ApprovePayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Date")]
    pub date: DateField,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/main/transfer/get/{id}", get(read_request))
        .route("/api/main/transfer/createTransferRequest", post(create_request))
        .route(
            "/api/main/transfer/transfer2RegistryOfficer",
            post(forward_to_officer),
        )
        .route("/api/main/transfer/transfer2BLRO", post(forward_to_authority))
        .route("/api/main/transfer/approveTransferRequest", post(approve_request))
}

// ── Handlers ────────────────────────────────────────────────────────

async fn read_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransferRequestRecord>, AppError> {
    Ok(Json(state.network.read_transfer_request(&id)?))
}

async fn create_request(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<CreateRequestPayload>>, JsonRejection>,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .create_transfer_request(&ctx, &p.id, &p.land_id, &p.lawyer_id, &p.date.to_arg())?;
    Ok(Json(Accepted::new("TransferRequest has been successfully added!", p.id)))
}

async fn forward_to_officer(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<ForwardToOfficerPayload>>, JsonRejection>,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .advance_to_registry_officer(&ctx, &p.id, &p.officer_id, &p.date.to_arg())?;
    Ok(Json(Accepted::new("TransferRequest has been successfully transferred!", p.id)))
}

async fn forward_to_authority(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<ForwardToAuthorityPayload>>, JsonRejection>,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .advance_to_authority(&ctx, &p.id, &p.authority_id, &p.date.to_arg())?;
    Ok(Json(Accepted::new(
        "TransferRequest has been successfully transferred to BLRO!",
        p.id,
    )))
}

async fn approve_request(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<ApprovePayload>>, JsonRejection>,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .approve_transfer_request(&ctx, &p.id, &p.date.to_arg())?;
    Ok(Json(Accepted::new("TransferRequest has been successfully approved!", p.id)))
}
