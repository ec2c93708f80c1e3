//! # lran-api: Binary Entry Point
//!
//! Starts the HTTP server over an in-memory ledger.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `PORT` | listen port | 8080 |
//! | `LRAN_CONFIG` | network config YAML | production role table |
//! | `LRAN_LOG_JSON` | `1` for JSON log lines | off |
//! | `RUST_LOG` | log filter | `info` |

use std::path::PathBuf;

use lran_api::state::{AppConfig, AppState};
use lran_workflow::NetworkConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if std::env::var("LRAN_LOG_JSON").is_ok_and(|v| v == "1") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config_path = std::env::var_os("LRAN_CONFIG").map(PathBuf::from);
    let network = NetworkConfig::load_or_default(config_path.as_deref()).map_err(|e| {
        tracing::error!("Config load failed: {e}");
        e
    })?;

    let config = AppConfig { port, network };
    let app = lran_api::app(AppState::new(&config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        strict_stage_order = config.network.strict_stage_order,
        "LRAN API listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
