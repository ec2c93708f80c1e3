//! # Party Registry Routes
//!
//! The three registries share one shape:
//!
//! - `GET /api/main/{contract}/get/{id}`: read a party
//! - `POST /api/main/{contract}/{create}`: register a party (own role)
//!
//! | contract | create | role |
//! |---|---|---|
//! | `lawyer` | `createLawyer` | Lawyer |
//! | `registryoffice` | `createRegistryOfficer` | RegistryOfficer |
//! | `blro` | `createBLRO` | Authority |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lran_registry::{PartyRecord, PartyRole};
use serde::Deserialize;

use super::Accepted;
use crate::error::AppError;
use crate::extractors::{extract_payload, Envelope};
use crate::identity::Invoker;
use crate::state::AppState;

/// Payload of the create routes. Lawyers and registry officers send
/// `CitizenID`, authorities send `Description`.
#[derive(Debug, Deserialize)]
pub struct CreatePartyPayload {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SecondaryID", alias = "CitizenID", alias = "Description")]
    pub secondary_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(registry_router("lawyer", "createLawyer", "Lawyer", PartyRole::Lawyer))
        .merge(registry_router(
            "registryoffice",
            "createRegistryOfficer",
            "RegistryOfficer",
            PartyRole::RegistryOfficer,
        ))
        .merge(registry_router("blro", "createBLRO", "BLRO", PartyRole::Authority))
}

fn registry_router(
    contract: &str,
    create: &str,
    noun: &'static str,
    role: PartyRole,
) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/main/{contract}/get/{{id}}"),
            get(move |state: State<AppState>, id: Path<String>| read_party(state, id, role)),
        )
        .route(
            &format!("/api/main/{contract}/{create}"),
            post(
                move |state: State<AppState>,
                      invoker: Invoker,
                      body: Result<Json<Envelope<CreatePartyPayload>>, JsonRejection>| {
                    create_party(state, invoker, body, role, noun)
                },
            ),
        )
}

async fn read_party(
    State(state): State<AppState>,
    Path(id): Path<String>,
    role: PartyRole,
) -> Result<Json<PartyRecord>, AppError> {
    Ok(Json(state.network.read_party(role, &id)?))
}

async fn create_party(
    State(state): State<AppState>,
    Invoker(ctx): Invoker,
    body: Result<Json<Envelope<CreatePartyPayload>>, JsonRejection>,
    role: PartyRole,
    noun: &'static str,
) -> Result<Json<Accepted>, AppError> {
    let p = extract_payload(body)?;
    state
        .network
        .create_party(&ctx, role, &p.id, &p.name, &p.secondary_id)?;
    Ok(Json(Accepted::new(
        &format!("{noun} has been successfully added!"),
        p.id,
    )))
}
