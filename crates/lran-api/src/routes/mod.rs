//! # Route Modules
//!
//! One module per contract, each exposing `router() -> Router<AppState>`.

pub mod land;
pub mod parties;
pub mod transfer;

use serde::{Deserialize, Serialize};

/// Body returned by every successful POST.
#[derive(Debug, Serialize, Deserialize)]
pub struct Accepted {
    pub message: String,
    pub id: String,
}

impl Accepted {
    pub fn new(message: &str, id: impl Into<String>) -> Self {
        Self {
            message: message.to_string(),
            id: id.into(),
        }
    }
}
