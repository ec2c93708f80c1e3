//! # Rich-Query Selectors
//!
//! A [`Selector`] is a predicate over a JSON record's top-level fields:
//! equality, regular-expression match on string fields, and conjunction.
//! Stores evaluate it against every committed record that parses as JSON.

use lran_core::{LedgerError, LedgerResult};
use regex::Regex;
use serde_json::Value;

/// Predicate over the top-level fields of a JSON record.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Field is present and equal to the value.
    Equals {
        /// Field name.
        field: String,
        /// Expected value.
        value: Value,
    },
    /// Field is a string matched by the pattern.
    Matches {
        /// Field name.
        field: String,
        /// Compiled pattern.
        pattern: Regex,
    },
    /// Every inner selector matches. An empty conjunction matches everything.
    All(Vec<Selector>),
}

impl Selector {
    /// `field == value`.
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field` matches the regular expression `pattern`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Argument`] if `pattern` does not compile.
    pub fn field_regex(field: impl Into<String>, pattern: &str) -> LedgerResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| LedgerError::Argument(format!("invalid query pattern: {e}")))?;
        Ok(Self::Matches {
            field: field.into(),
            pattern,
        })
    }

    /// `field` contains `needle`, ignoring case. The needle is matched
    /// literally, not as a pattern.
    pub fn field_contains_ignore_case(
        field: impl Into<String>,
        needle: &str,
    ) -> LedgerResult<Self> {
        Self::field_regex(field, &format!("(?i){}", regex::escape(needle)))
    }

    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Selector) -> Self {
        match self {
            Self::All(mut inner) => {
                inner.push(other);
                Self::All(inner)
            }
            first => Self::All(vec![first, other]),
        }
    }

    /// Evaluate against one record.
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Self::Equals { field, value } => doc.get(field) == Some(value),
            Self::Matches { field, pattern } => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| pattern.is_match(s)),
            Self::All(inner) => inner.iter().all(|s| s.matches(doc)),
        }
    }
}
