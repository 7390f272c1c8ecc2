//! Errors produced by parsing, building and comparing tagged URNs

use thiserror::Error;

/// Errors that can occur when working with tagged URNs
///
/// Every variant has a stable numeric [`code`](TaggedUrnError::code) and a
/// stable symbolic [`name`](TaggedUrnError::name).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaggedUrnError {
    /// Error code 1: Input has no `:` separating prefix from tags
    #[error("Tagged URN is missing a prefix (expected 'prefix:...')")]
    MissingPrefix,
    /// Error code 2: Prefix before `:` is empty
    #[error("Tagged URN prefix cannot be empty")]
    EmptyPrefix,
    /// Error code 3: Disallowed character in prefix, key or value
    #[error("Invalid character {0}")]
    InvalidCharacter(String),
    /// Error code 4: Empty key or value component
    #[error("Tag key or value cannot be empty: {0}")]
    EmptyTag(String),
    /// Error code 5: Same key appears twice
    #[error("Duplicate tag key: {0}")]
    DuplicateKey(String),
    /// Error code 6: Key is purely numeric
    #[error("Tag key cannot be purely numeric: {0}")]
    NumericKey(String),
    /// Error code 7: Quoted value never closed
    #[error("Unterminated quote at position {0}")]
    UnterminatedQuote(usize),
    /// Error code 8: Invalid escape in quoted value (only \" and \\ allowed)
    #[error("Invalid escape sequence at position {0} (only \\\" and \\\\ allowed)")]
    InvalidEscapeSequence(usize),
    /// Error code 9: Leading or trailing whitespace
    #[error("Tagged URN has leading or trailing whitespace: {0:?}")]
    WhitespaceInInput(String),
    /// Error code 10: Comparing URNs from different prefixes
    #[error("Cannot compare URNs with different prefixes: '{expected}' vs '{actual}'")]
    PrefixMismatch { expected: String, actual: String },
    /// Error code 11: Structurally invalid construction (builder misuse)
    #[error("Invalid tagged URN format: {0}")]
    InvalidFormat(String),
}

impl TaggedUrnError {
    /// Stable numeric error code
    pub fn code(&self) -> u8 {
        match self {
            TaggedUrnError::MissingPrefix => 1,
            TaggedUrnError::EmptyPrefix => 2,
            TaggedUrnError::InvalidCharacter(_) => 3,
            TaggedUrnError::EmptyTag(_) => 4,
            TaggedUrnError::DuplicateKey(_) => 5,
            TaggedUrnError::NumericKey(_) => 6,
            TaggedUrnError::UnterminatedQuote(_) => 7,
            TaggedUrnError::InvalidEscapeSequence(_) => 8,
            TaggedUrnError::WhitespaceInInput(_) => 9,
            TaggedUrnError::PrefixMismatch { .. } => 10,
            TaggedUrnError::InvalidFormat(_) => 11,
        }
    }

    /// Stable symbolic error name
    pub fn name(&self) -> &'static str {
        match self {
            TaggedUrnError::MissingPrefix => "MISSING_PREFIX",
            TaggedUrnError::EmptyPrefix => "EMPTY_PREFIX",
            TaggedUrnError::InvalidCharacter(_) => "INVALID_CHARACTER",
            TaggedUrnError::EmptyTag(_) => "EMPTY_TAG",
            TaggedUrnError::DuplicateKey(_) => "DUPLICATE_KEY",
            TaggedUrnError::NumericKey(_) => "NUMERIC_KEY",
            TaggedUrnError::UnterminatedQuote(_) => "UNTERMINATED_QUOTE",
            TaggedUrnError::InvalidEscapeSequence(_) => "INVALID_ESCAPE_SEQUENCE",
            TaggedUrnError::WhitespaceInInput(_) => "WHITESPACE_IN_INPUT",
            TaggedUrnError::PrefixMismatch { .. } => "PREFIX_MISMATCH",
            TaggedUrnError::InvalidFormat(_) => "INVALID_FORMAT",
        }
    }

    pub(crate) fn prefix_mismatch(expected: &str, actual: &str) -> Self {
        TaggedUrnError::PrefixMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
