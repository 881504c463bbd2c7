//! Plugin configuration.
//!
//! Two layers live here:
//!
//! - [`AppConfig`] — the typed settings deserialized from TOML files and
//!   environment variables via the `config` crate at process start.
//! - [`container::ConfigContainer`] — the write-once key/value container
//!   the bootstrap populates from those settings and hands to every
//!   component that needs to read plugin identity at runtime.

pub mod container;
pub mod host;
pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::host::HostConfig;
use self::logging::LoggingConfig;
use self::plugin::PluginSettings;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PKGTPL";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay) and `PKGTPL__*` variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Plugin identity settings.
    pub plugin: PluginSettings,
    /// Host integration settings.
    pub host: HostConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory of the working directory.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from TOML files in `dir`.
    ///
    /// Merges `default.toml` with an environment-specific overlay and
    /// environment variables prefixed with `PKGTPL__`. Missing files are
    /// not an error; every field has a default.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let default_path = dir.join("default");
        let env_path = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_path.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&env_path.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path(), "test").unwrap();

        assert_eq!(config.plugin.slug, "package-template");
        assert_eq!(config.plugin.prefix, "wpmpt_");
        assert_eq!(config.host.guard_env, "ABSPATH");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overlay_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[plugin]\nversion = \"1.0.0\"\nprefix = \"abc_\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.toml"),
            "[plugin]\nversion = \"1.1.0\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "staging").unwrap();
        assert_eq!(config.plugin.version, "1.1.0");
        assert_eq!(config.plugin.prefix, "abc_");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[plugin\nversion = ").unwrap();

        let err = AppConfig::load_from(dir.path(), "test").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
