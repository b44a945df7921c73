//! Agent code validation.
//!
//! An [`AgentCode`] is only ever constructed through [`AgentCode::parse`],
//! so holding one means the full validation pipeline passed. The shape rule
//! is a [`CodePolicy`] configuration value: the two historic kiosk variants
//! disagreed (alphanumeric 4–20 vs. digits only), so neither is hard-coded.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Hard upper bound on candidate length, independent of the policy shape.
const MAX_CANDIDATE_LEN: usize = 50;

/// Configured shape rule for agent codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePolicy {
    /// ASCII alphanumeric with inclusive length bounds.
    Alphanumeric { min: usize, max: usize },
    /// ASCII digits only, any length (the global 50-char cap still applies).
    Digits,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self::alphanumeric()
    }
}

impl CodePolicy {
    /// The default shape: alphanumeric, 4–20 characters.
    #[must_use]
    pub const fn alphanumeric() -> Self {
        Self::Alphanumeric { min: 4, max: 20 }
    }

    /// Whether `candidate` satisfies this shape rule.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match *self {
            Self::Alphanumeric { min, max } => {
                let len = candidate.chars().count();
                len >= min && len <= max && candidate.chars().all(|c| c.is_ascii_alphanumeric())
            }
            Self::Digits => {
                !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit())
            }
        }
    }

    /// Human-readable description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match *self {
            Self::Alphanumeric { min, max } => format!("alphanumeric, {min}-{max} characters"),
            Self::Digits => "digits only".to_string(),
        }
    }
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeViolation {
    #[error("agent code is empty")]
    Empty,

    #[error("agent code is too long ({len} characters, maximum {MAX_CANDIDATE_LEN})")]
    TooLong { len: usize },

    /// The candidate contains both `<` and `>`. This is a cheap guard against
    /// markup smuggled into a QR payload, not a sanitizer — display code must
    /// still escape everything it renders.
    #[error("agent code contains markup")]
    Markup,

    #[error("agent code does not match the configured shape ({shape})")]
    Shape { shape: String },
}

/// A validated agent identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AgentCode(String);

impl AgentCode {
    /// Validate `candidate` under `policy`.
    ///
    /// All clauses must hold, checked in order: non-empty, length cap,
    /// markup guard, policy shape.
    ///
    /// # Errors
    ///
    /// Returns the first [`CodeViolation`] encountered.
    pub fn parse(candidate: &str, policy: &CodePolicy) -> Result<Self, CodeViolation> {
        if candidate.is_empty() {
            return Err(CodeViolation::Empty);
        }
        let len = candidate.chars().count();
        if len > MAX_CANDIDATE_LEN {
            return Err(CodeViolation::TooLong { len });
        }
        if candidate.contains('<') && candidate.contains('>') {
            return Err(CodeViolation::Markup);
        }
        if !policy.matches(candidate) {
            return Err(CodeViolation::Shape {
                shape: policy.describe(),
            });
        }
        Ok(Self(candidate.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_policy_accepts_reasonable_codes() {
        let policy = CodePolicy::default();
        for code in ["ABCD1", "1234", "a1b2c3", "X9X9X9X9X9X9X9X9X9X9"] {
            assert!(
                AgentCode::parse(code, &policy).is_ok(),
                "{code} should parse"
            );
        }
    }

    #[test]
    fn alphanumeric_policy_enforces_length_bounds() {
        let policy = CodePolicy::alphanumeric();
        assert_eq!(
            AgentCode::parse("ab1", &policy).unwrap_err(),
            CodeViolation::Shape {
                shape: "alphanumeric, 4-20 characters".into()
            }
        );
        // 21 chars: one past the shape maximum, still under the global cap.
        let long = "a".repeat(21);
        assert!(matches!(
            AgentCode::parse(&long, &policy),
            Err(CodeViolation::Shape { .. })
        ));
    }

    #[test]
    fn digits_policy_rejects_letters() {
        let policy = CodePolicy::Digits;
        assert!(AgentCode::parse("0042", &policy).is_ok());
        assert!(matches!(
            AgentCode::parse("0042X", &policy),
            Err(CodeViolation::Shape { .. })
        ));
    }

    #[test]
    fn fifty_one_digits_hit_the_global_length_cap() {
        let candidate = "7".repeat(51);
        assert_eq!(
            AgentCode::parse(&candidate, &CodePolicy::Digits).unwrap_err(),
            CodeViolation::TooLong { len: 51 }
        );
    }

    #[test]
    fn fifty_digits_pass_the_cap_under_digits_policy() {
        let candidate = "7".repeat(50);
        assert!(AgentCode::parse(&candidate, &CodePolicy::Digits).is_ok());
    }

    #[test]
    fn markup_guard_needs_both_angle_brackets() {
        let policy = CodePolicy::default();
        assert_eq!(
            AgentCode::parse("<script>", &policy).unwrap_err(),
            CodeViolation::Markup
        );
        // A single bracket falls through to the shape check instead.
        assert!(matches!(
            AgentCode::parse("a<b", &policy),
            Err(CodeViolation::Shape { .. })
        ));
    }

    #[test]
    fn empty_candidate_is_its_own_violation() {
        assert_eq!(
            AgentCode::parse("", &CodePolicy::default()).unwrap_err(),
            CodeViolation::Empty
        );
    }

    #[test]
    fn parse_is_idempotent_on_failures() {
        let policy = CodePolicy::default();
        let first = AgentCode::parse("<script>", &policy).unwrap_err();
        let second = AgentCode::parse("<script>", &policy).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn display_round_trips_the_raw_code() {
        let code = AgentCode::parse("ABCD1", &CodePolicy::default()).unwrap();
        assert_eq!(code.to_string(), "ABCD1");
        assert_eq!(code.as_str(), "ABCD1");
    }
}
