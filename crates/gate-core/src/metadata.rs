//! Display-only metadata carried alongside a decoded agent code.

use serde::{Deserialize, Serialize};

/// Optional display fields a structured QR payload may carry.
///
/// These are presentation hints only — never inputs to validation or
/// authorization, and rendered through the escaping boundary like any other
/// untrusted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, rename = "validFrom", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,

    #[serde(default, rename = "validUntil", skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

impl ScanMetadata {
    /// True when no field is set — bare-code and URL payloads carry none.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.location.is_none()
            && self.valid_from.is_none()
            && self.valid_until.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(ScanMetadata::default().is_empty());
    }

    #[test]
    fn camel_case_keys_deserialize() {
        let meta: ScanMetadata = serde_json::from_str(
            r#"{"name":"J. Doe","department":"Ops","validFrom":"2025-01-01","validUntil":"2026-01-01"}"#,
        )
        .unwrap();
        assert_eq!(meta.name.as_deref(), Some("J. Doe"));
        assert_eq!(meta.department.as_deref(), Some("Ops"));
        assert_eq!(meta.valid_from.as_deref(), Some("2025-01-01"));
        assert_eq!(meta.valid_until.as_deref(), Some("2026-01-01"));
        assert!(meta.location.is_none());
        assert!(!meta.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let meta: ScanMetadata =
            serde_json::from_str(r#"{"agentCode":"ABCD1","badge":"visitor"}"#).unwrap();
        assert!(meta.is_empty());
    }
}
