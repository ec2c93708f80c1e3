//! # lran-cli: Command-Line Client for the Land Records Network
//!
//! Runs contract functions against a ledger persisted as a JSON snapshot
//! file, so a sequence of `lran` invocations behaves like a sequence of
//! transactions against one ledger.
//!
//! ## Subcommands
//!
//! - `lran invoke`: run one contract function (see [`invoke`]).
//! - `lran roles`: print the role table in effect.
//!
//! ```bash
//! lran --ledger net.json invoke --msp BLROMSP --issuer ca.blro.lran.com --subject BL1 \
//!     land createLand L1 "1 High St" "Jane Smith" 20230101
//! lran --ledger net.json invoke land readLand L1
//! ```

pub mod invoke;
pub mod roles;
pub mod snapshot;
