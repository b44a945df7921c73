//! Decoder error types.

use gate_core::CodeViolation;
use thiserror::Error;

/// Typed reasons a payload failed to decode.
///
/// The `raw` fields carry the offending input for diagnostic display only —
/// they are untrusted text and must pass through the escaping boundary before
/// being rendered as markup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Input was empty after trimming. Signaled before any parsing.
    #[error("empty input")]
    EmptyInput,

    /// The payload is an absolute URL but its query string carries no valid
    /// code parameter.
    #[error("URL payload does not contain a valid agent code")]
    InvalidUrlPayload { raw: String },

    /// A candidate code was found but failed validation.
    #[error("invalid agent code: {violation}")]
    InvalidCodeFormat { raw: String, violation: CodeViolation },
}

impl DecodeError {
    /// Stable kind label for log fields and machine-readable output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::InvalidUrlPayload { .. } => "invalid_url_payload",
            Self::InvalidCodeFormat { .. } => "invalid_code_format",
        }
    }
}
