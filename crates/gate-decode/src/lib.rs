//! # gate-decode
//!
//! Turns a raw scanned or typed payload into a validated [`AgentCode`].
//!
//! Recognized payload shapes, in classification order:
//! 1. **Absolute URL** — the code is pulled directly from the configured query
//!    parameter (default `AuthCode`); a URL without a valid parameter is a
//!    typed failure.
//! 2. **JSON object** — keys `agentCode`/`code`/`id` in priority order, with
//!    `name`/`department`/`location`/`validFrom`/`validUntil` carried through
//!    as display-only [`ScanMetadata`].
//! 3. **Bare code** — the whole trimmed input.
//!
//! Decoding is a pure function of the input and the configured policy: no
//! I/O, no hidden state, identical input always yields the identical result.

mod error;
mod payload;

pub use error::DecodeError;

use gate_core::{AgentCode, CodePolicy, ScanMetadata};
use serde::Serialize;

/// Default query parameter carrying the code in URL payloads.
pub const DEFAULT_CODE_PARAM: &str = "AuthCode";

/// A successfully decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub code: AgentCode,
    /// Display-only fields from a structured payload; empty otherwise.
    #[serde(skip_serializing_if = "ScanMetadata::is_empty")]
    pub meta: ScanMetadata,
}

/// Payload decoder configured with a code policy and URL parameter name.
#[derive(Debug, Clone)]
pub struct Decoder {
    policy: CodePolicy,
    param: String,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(CodePolicy::default(), DEFAULT_CODE_PARAM)
    }
}

impl Decoder {
    #[must_use]
    pub fn new(policy: CodePolicy, param: impl Into<String>) -> Self {
        Self {
            policy,
            param: param.into(),
        }
    }

    /// Decode `input` into an agent code plus optional metadata.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::EmptyInput`] when the input is empty after trimming.
    /// - [`DecodeError::InvalidUrlPayload`] when the input is an absolute URL
    ///   whose query string has no valid code parameter.
    /// - [`DecodeError::InvalidCodeFormat`] when the candidate fails the
    ///   validation pipeline (length cap, markup guard, policy shape).
    pub fn decode(&self, input: &str) -> Result<Decoded, DecodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        if payload::is_absolute_url(trimmed) {
            // URL payloads either yield a policy-valid parameter value or
            // fail as a whole; a malformed value is not a bare-code fallback.
            return match payload::query_param(trimmed, &self.param) {
                Some(value) => match AgentCode::parse(&value, &self.policy) {
                    Ok(code) => Ok(Decoded {
                        code,
                        meta: ScanMetadata::default(),
                    }),
                    Err(_) => Err(DecodeError::InvalidUrlPayload {
                        raw: trimmed.to_owned(),
                    }),
                },
                None => Err(DecodeError::InvalidUrlPayload {
                    raw: trimmed.to_owned(),
                }),
            };
        }

        let (candidate, meta) = payload::classify(trimmed);
        let code = AgentCode::parse(&candidate, &self.policy).map_err(|violation| {
            DecodeError::InvalidCodeFormat {
                raw: candidate,
                violation,
            }
        })?;

        Ok(Decoded { code, meta })
    }
}
