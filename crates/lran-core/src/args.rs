//! # Argument Validation
//!
//! Every public operation takes a fixed number of string arguments, none of
//! which may be empty. These checks run before any ledger state is read.

use crate::error::LedgerError;

/// Check cardinality and non-emptiness, returning the arguments as a fixed
/// array of string slices.
///
/// # Errors
///
/// [`LedgerError::Argument`] if `args.len() != N` or any argument is empty.
pub fn expect_args<const N: usize>(args: &[String]) -> Result<[&str; N], LedgerError> {
    if args.len() != N {
        return Err(LedgerError::Argument(format!(
            "incorrect number of arguments: expecting {N}, got {}",
            args.len()
        )));
    }
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.as_str();
    }
    require_non_empty(&out)?;
    Ok(out)
}

/// Reject the call if any argument is an empty string.
pub fn require_non_empty(args: &[&str]) -> Result<(), LedgerError> {
    match args.iter().position(|a| a.is_empty()) {
        Some(i) => Err(LedgerError::Argument(format!(
            "argument {} must be a non-empty string",
            i + 1
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_exact_count() {
        let args = owned(&["L1", "12 Main St", "Smith", "20230101"]);
        let [id, addr, owner, date] = expect_args::<4>(&args).unwrap();
        assert_eq!((id, addr, owner, date), ("L1", "12 Main St", "Smith", "20230101"));
    }

    #[test]
    fn rejects_wrong_count() {
        let args = owned(&["L1", "12 Main St"]);
        assert!(matches!(expect_args::<4>(&args), Err(LedgerError::Argument(_))));
        assert!(matches!(expect_args::<1>(&args), Err(LedgerError::Argument(_))));
    }

    #[test]
    fn rejects_empty_argument() {
        let args = owned(&["L1", ""]);
        let err = expect_args::<2>(&args).unwrap_err();
        assert!(err.to_string().contains("argument 2"));
    }
}
