//! # gate-config
//!
//! Layered configuration loading for Gatehouse using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GATEHOUSE_*` prefix, `__` as separator)
//! 2. Project-level `.gatehouse/config.toml`
//! 3. User-level `~/.config/gatehouse/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GATEHOUSE_POLICY__SHAPE` -> `policy.shape`,
//! `GATEHOUSE_UPLOAD__MAX_BYTES` -> `upload.max_bytes`, etc. The `__`
//! (double underscore) separates nested config sections.

mod error;
mod policy;
mod resolver;
mod server;
mod upload;

pub use error::ConfigError;
pub use policy::{CodeShape, PolicyConfig};
pub use resolver::ResolverConfig;
pub use server::ServerConfig;
pub use upload::UploadConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GateConfig {
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl GateConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables) and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a field value is
    /// out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support. This is the typical
    /// entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".gatehouse/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("GATEHOUSE_").split("__"));

        figment
    }

    /// Cross-field sanity checks that figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.min_len == 0 || self.policy.min_len > self.policy.max_len {
            return Err(ConfigError::InvalidValue {
                field: "policy.min_len".into(),
                reason: format!(
                    "must be between 1 and max_len ({})",
                    self.policy.max_len
                ),
            });
        }
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.max_bytes".into(),
                reason: "size cap must be positive".into(),
            });
        }
        if self.policy.param.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "policy.param".into(),
                reason: "query parameter name must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gatehouse").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is
    /// found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.policy.param, "AuthCode");
        assert_eq!(config.resolver.base, "idcards");
        assert_eq!(config.server.bind, "127.0.0.1:8630");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: GateConfig = GateConfig::figment().extract().expect("defaults extract");
            assert_eq!(config.upload.max_bytes, 20 * 1024 * 1024);
            assert_eq!(config.policy.shape, CodeShape::Alphanumeric);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_nested_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GATEHOUSE_POLICY__SHAPE", "digits");
            jail.set_env("GATEHOUSE_UPLOAD__MAX_BYTES", "1048576");
            let config: GateConfig = GateConfig::figment().extract().expect("env extract");
            assert_eq!(config.policy.shape, CodeShape::Digits);
            assert_eq!(config.upload.max_bytes, 1_048_576);
            Ok(())
        });
    }

    #[test]
    fn project_toml_layers_under_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".gatehouse")?;
            jail.create_file(
                ".gatehouse/config.toml",
                r#"
                    [server]
                    bind = "0.0.0.0:9000"

                    [resolver]
                    base = "https://kiosk.example/idcards"
                "#,
            )?;
            let config: GateConfig = GateConfig::figment().extract().expect("toml extract");
            assert_eq!(config.server.bind, "0.0.0.0:9000");
            assert!(config.resolver.is_remote());
            Ok(())
        });
    }

    #[test]
    fn zero_min_len_is_rejected() {
        let mut config = GateConfig::default();
        config.policy.min_len = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "policy.min_len"
        ));
    }

    #[test]
    fn zero_size_cap_is_rejected() {
        let mut config = GateConfig::default();
        config.upload.max_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_param_is_rejected() {
        let mut config = GateConfig::default();
        config.policy.param = String::new();
        assert!(config.validate().is_err());
    }
}
