//! # lran-api: HTTP Service for the Land Records Network
//!
//! Thin Axum layer over [`lran_workflow::Network`]. Every route maps to one
//! public operation; the caller identity travels in request headers (see
//! [`identity`]) and is resolved by the network, not here.
//!
//! ## API Surface
//!
//! | Prefix                          | Module               |
//! |---------------------------------|----------------------|
//! | `/api/main/land/*`              | [`routes::land`]     |
//! | `/api/main/lawyer/*`            | [`routes::parties`]  |
//! | `/api/main/registryoffice/*`    | [`routes::parties`]  |
//! | `/api/main/blro/*`              | [`routes::parties`]  |
//! | `/api/main/transfer/*`          | [`routes::transfer`] |
//! | `/health/*`                     | probes               |

pub mod error;
pub mod extractors;
pub mod identity;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::land::router())
        .merge(routes::parties::router())
        .merge(routes::transfer::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
async fn readiness() -> &'static str {
    "ready"
}
