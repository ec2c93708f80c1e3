//! # Error Types: Ledger Operation Failures
//!
//! Defines [`LedgerError`], the one error type every public operation in the
//! network returns. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Authorization failures carry the caller's *actual* organization and
//!   issuer so operators can diagnose misconfigured identities.
//! - A failed chained call is wrapped in [`LedgerError::Downstream`] with the
//!   inner error kept intact; its message is propagated verbatim.
//! - Every failure is terminal for the operation. Nothing in this layer
//!   retries.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Top-level error type for the land records network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The caller's (organization, issuer) pair does not match the role the
    /// operation requires.
    #[error("access denied: caller org {org:?} with issuer {issuer:?} is not {required}")]
    AccessDenied {
        /// Role the operation required.
        required: String,
        /// Organization the caller presented.
        org: String,
        /// Certificate issuer common name the caller presented.
        issuer: String,
    },

    /// Wrong argument count or an empty argument.
    #[error("argument error: {0}")]
    Argument(String),

    /// A create operation found the id already present.
    #[error("{kind} {id:?} already exists")]
    AlreadyExists {
        /// Record kind (e.g. "land", "lawyer").
        kind: &'static str,
        /// The duplicate id.
        id: String,
    },

    /// A read or update found no record for the id.
    #[error("{kind} {id:?} does not exist")]
    NotFound {
        /// Record kind.
        kind: &'static str,
        /// The missing id.
        id: String,
    },

    /// A date argument was not an integer day number.
    #[error("invalid date: {0:?} is not an integer day number")]
    DateFormat(String),

    /// A chained call into another registry failed.
    #[error("{target}: {source}")]
    Downstream {
        /// The registry and operation that failed (e.g. "lawyer.addCase").
        target: String,
        /// The error the chained call returned.
        source: Box<LedgerError>,
    },

    /// The invocation context did not yield a usable identity.
    #[error("identity error: {0}")]
    Identity(String),

    /// A transition was attempted out of order with strict stage checking on.
    #[error("transfer request {id:?} is at stage {from}, cannot move to {to}")]
    InvalidStage {
        /// Transfer request id.
        id: String,
        /// Current stage (or "COMPLETE").
        from: String,
        /// Attempted target.
        to: String,
    },

    /// The write-set was rejected because a key it read changed underneath it.
    #[error("commit conflict on key {key:?}")]
    Conflict {
        /// The first key whose version no longer matched.
        key: String,
    },

    /// A stored record could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// The dispatcher received a function the contract does not expose.
    #[error("unknown function {function:?} on contract {contract}")]
    UnknownFunction {
        /// Contract name.
        contract: String,
        /// Function name as received.
        function: String,
    },
}

impl LedgerError {
    /// Wrap this error as the failure of a chained call into `target`.
    pub fn downstream(self, target: impl Into<String>) -> Self {
        Self::Downstream {
            target: target.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::Argument(_) => "ARGUMENT_ERROR",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DateFormat(_) => "DATE_FORMAT_ERROR",
            Self::Downstream { .. } => "DOWNSTREAM_FAILURE",
            Self::Identity(_) => "IDENTITY_ERROR",
            Self::InvalidStage { .. } => "INVALID_STAGE",
            Self::Conflict { .. } => "CONFLICT",
            Self::Codec(_) => "CODEC_ERROR",
            Self::UnknownFunction { .. } => "UNKNOWN_FUNCTION",
        }
    }

    /// The innermost error, looking through any number of `Downstream` layers.
    pub fn root_cause(&self) -> &LedgerError {
        match self {
            Self::Downstream { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}
