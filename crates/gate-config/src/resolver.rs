//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Default asset base: the flat uploads directory next to the server.
fn default_base() -> String {
    "idcards".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base the resolver probes under: a URL prefix
    /// (`https://kiosk.example/idcards`) or a local directory. The scanner
    /// page and the main page historically used different prefixes for the
    /// same directory; this is that knob.
    #[serde(default = "default_base")]
    pub base: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
        }
    }
}

impl ResolverConfig {
    /// Whether the base is probed over HTTP rather than the filesystem.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_base_is_local() {
        let config = ResolverConfig::default();
        assert_eq!(config.base, "idcards");
        assert!(!config.is_remote());
    }

    #[test]
    fn url_bases_are_remote() {
        let config = ResolverConfig {
            base: "https://kiosk.example/idcards".into(),
        };
        assert!(config.is_remote());
    }
}
