//! # Request Body Extraction
//!
//! POST bodies carry their fields under a `payload` key:
//! `{"payload": {"ID": "L1", ...}}`.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;

/// The `{"payload": ...}` envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub payload: T,
}

/// Extract an enveloped JSON body, mapping deserialization errors to
/// [`AppError::BadRequest`].
pub fn extract_payload<T>(result: Result<Json<Envelope<T>>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(envelope)| envelope.payload)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// A day number as clients send it: either a JSON integer or a string.
/// Strings are validated by the ledger operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Number(i64),
    Text(String),
}

impl DateField {
    /// The value as the ledger operation expects it.
    pub fn to_arg(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_number_or_string() {
        let n: DateField = serde_json::from_str("20230105").unwrap();
        let s: DateField = serde_json::from_str("\"20230105\"").unwrap();
        assert_eq!(n.to_arg(), "20230105");
        assert_eq!(s.to_arg(), "20230105");
    }
}
