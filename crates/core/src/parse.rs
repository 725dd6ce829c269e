//! Parsing of textual enum values (CLI flags, config).

use thiserror::Error;

/// A string did not name any variant of the expected enum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct ParseVariantError {
    /// What was being parsed, e.g. `"size"`.
    pub kind: &'static str,

    /// The rejected input.
    pub value: String,

    /// Comma separated list of accepted values.
    pub expected: &'static str,
}

impl ParseVariantError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
