//! # Day Numbers
//!
//! Dates on the ledger are plain integers chosen by the caller, conventionally
//! `YYYYMMDD`. The only validation is that the argument parses as an integer;
//! calendar validity is not checked.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// An integer day stamp such as `20230105`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayNumber(i64);

impl DayNumber {
    /// Wrap a raw day number.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a day number argument.
    ///
    /// # Errors
    ///
    /// [`LedgerError::DateFormat`] if `s` is not an integer.
    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| LedgerError::DateFormat(s.to_string()))
    }

    /// The raw integer.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DayNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DayNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
