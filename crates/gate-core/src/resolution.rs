//! Asset resolution results and the fixed extension probe order.

use std::fmt;

use serde::Serialize;

/// Image extension variants an ID card can be stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Jpg,
    Jpeg,
    Png,
    Webp,
}

impl Extension {
    /// Fixed probe order, most common first. Resolution is deterministic:
    /// the first extension that exists wins even if a later one also would.
    pub const PROBE_ORDER: [Self; 4] = [Self::Jpg, Self::Jpeg, Self::Png, Self::Webp];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one resolution pass over the extension order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Location of the first variant that exists, if any.
    pub resolved: Option<String>,

    /// Extensions probed, in order, before resolution finished.
    pub tried: Vec<Extension>,
}

impl Resolution {
    #[must_use]
    pub const fn found(&self) -> bool {
        self.resolved.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn probe_order_is_fixed() {
        let order: Vec<&str> = Extension::PROBE_ORDER
            .iter()
            .map(|e| e.as_str())
            .collect();
        assert_eq!(order, vec!["jpg", "jpeg", "png", "webp"]);
    }

    #[test]
    fn found_tracks_resolved() {
        let hit = Resolution {
            resolved: Some("idcards/A1.png".into()),
            tried: vec![Extension::Jpg, Extension::Jpeg, Extension::Png],
        };
        assert!(hit.found());

        let miss = Resolution {
            resolved: None,
            tried: Extension::PROBE_ORDER.to_vec(),
        };
        assert!(!miss.found());
    }
}
