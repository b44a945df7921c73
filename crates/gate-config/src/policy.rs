//! Code validation policy configuration.
//!
//! The two historic kiosk variants enforced different code shapes
//! (alphanumeric 4–20 on the scanner page, digits-only on the main page), so
//! the shape is an explicit configuration value rather than a hard-coded rule.

use gate_core::CodePolicy;
use serde::{Deserialize, Serialize};

/// Default minimum code length for the alphanumeric shape.
const fn default_min_len() -> usize {
    4
}

/// Default maximum code length for the alphanumeric shape.
const fn default_max_len() -> usize {
    20
}

/// Default query parameter that round-trips the code in URLs.
fn default_param() -> String {
    "AuthCode".to_string()
}

/// Which shape rule applies to agent codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeShape {
    #[default]
    Alphanumeric,
    Digits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// `alphanumeric` or `digits`.
    #[serde(default)]
    pub shape: CodeShape,

    /// Minimum length (alphanumeric shape only).
    #[serde(default = "default_min_len")]
    pub min_len: usize,

    /// Maximum length (alphanumeric shape only).
    #[serde(default = "default_max_len")]
    pub max_len: usize,

    /// Query parameter carrying the code in URL payloads and share links.
    /// Matched case-sensitively.
    #[serde(default = "default_param")]
    pub param: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            shape: CodeShape::default(),
            min_len: default_min_len(),
            max_len: default_max_len(),
            param: default_param(),
        }
    }
}

impl PolicyConfig {
    /// The [`CodePolicy`] this configuration describes.
    #[must_use]
    pub fn code_policy(&self) -> CodePolicy {
        match self.shape {
            CodeShape::Alphanumeric => CodePolicy::Alphanumeric {
                min: self.min_len,
                max: self.max_len,
            },
            CodeShape::Digits => CodePolicy::Digits,
        }
    }
}
