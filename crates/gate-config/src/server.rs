//! Kiosk server configuration.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:8630".to_string()
}

/// Where upload outcomes redirect to.
fn default_redirect() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the kiosk server.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Redirect target for every upload outcome. Feedback travels purely in
    /// `upload=`/`message=`/`filename=` query parameters on this target.
    #[serde(default = "default_redirect")]
    pub redirect: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            redirect: default_redirect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_bind_loopback() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:8630");
        assert_eq!(config.redirect, "/");
    }
}
