//! # lran-core: Foundational Types for the Land Records Network
//!
//! Every other crate in the workspace depends on `lran-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - **Errors** (`error.rs`): the single [`LedgerError`] taxonomy shared by
//!   every registry and the transfer workflow.
//! - **Identity** (`identity.rs`): [`Role`] and [`CallerIdentity`], the
//!   resolved (organization, issuer, subject) triple of an invocation.
//! - **Dates** (`temporal.rs`): [`DayNumber`], the integer day stamp
//!   (e.g. `20230105`) carried by history and status entries.
//! - **Arguments** (`args.rs`): cardinality and non-empty checks applied to
//!   every public operation before any state is touched.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lran-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod args;
pub mod error;
pub mod identity;
pub mod temporal;

pub use args::{expect_args, require_non_empty};
pub use error::{LedgerError, LedgerResult};
pub use identity::{CallerIdentity, Role};
pub use temporal::DayNumber;
