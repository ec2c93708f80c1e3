//! # Application State
//!
//! Shared state passed to every route handler via the `State` extractor.
//! The ledger behind the network is in memory; clones share it.

use std::sync::Arc;

use lran_ledger::MemoryLedger;
use lran_workflow::{Network, NetworkConfig};

/// Server settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Network settings.
    pub network: NetworkConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            network: NetworkConfig::default(),
        }
    }
}

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The network every route operates on.
    pub network: Arc<Network>,
    /// The ledger behind it.
    pub ledger: MemoryLedger,
}

impl AppState {
    /// State over a fresh in-memory ledger.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_ledger(MemoryLedger::new(), config)
    }

    /// State over an existing ledger.
    pub fn with_ledger(ledger: MemoryLedger, config: &AppConfig) -> Self {
        Self {
            network: Arc::new(Network::with_memory_ledger(ledger.clone(), &config.network)),
            ledger,
        }
    }
}
