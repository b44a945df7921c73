//! Upload endpoint configuration.

use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

/// Default size cap: 20 MiB. This is the enforced value, and user-facing
/// messages are derived from it — the historic kiosk told users "5MB" while
/// enforcing 20, which was a defect, not a behavior to keep.
const fn default_max_bytes() -> u64 {
    20 * MIB
}

fn default_dir() -> String {
    "idcards".to_string()
}

/// Declared MIME types accepted for card uploads.
fn default_allowed_types() -> Vec<String> {
    ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Flat target directory. The directory IS the code-to-image index;
    /// there is no separate manifest.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Enforced size cap in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted declared MIME types.
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            max_bytes: default_max_bytes(),
            allowed_types: default_allowed_types(),
        }
    }
}

impl UploadConfig {
    /// Whether a declared MIME type is on the allowlist.
    #[must_use]
    pub fn accepts_type(&self, mime: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime)
    }

    /// Human-readable form of the enforced cap for user-facing messages.
    #[must_use]
    pub fn max_human(&self) -> String {
        if self.max_bytes % MIB == 0 {
            format!("{} MiB", self.max_bytes / MIB)
        } else {
            format!("{} bytes", self.max_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_the_enforced_cap() {
        let config = UploadConfig::default();
        assert_eq!(config.max_bytes, 20 * 1024 * 1024);
        assert_eq!(config.max_human(), "20 MiB");
        assert_eq!(config.dir, "idcards");
    }

    #[test]
    fn type_allowlist_covers_the_image_formats() {
        let config = UploadConfig::default();
        for mime in ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"] {
            assert!(config.accepts_type(mime), "{mime} should be accepted");
        }
        assert!(!config.accepts_type("application/pdf"));
        assert!(!config.accepts_type("image/svg+xml"));
    }

    #[test]
    fn odd_caps_fall_back_to_bytes() {
        let config = UploadConfig {
            max_bytes: 1_500_000,
            ..Default::default()
        };
        assert_eq!(config.max_human(), "1500000 bytes");
    }
}
