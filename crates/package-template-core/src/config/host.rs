//! Host integration settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings describing the host runtime the plugin runs inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Environment marker that must be set when running inside the host.
    #[serde(default = "default_guard_env")]
    pub guard_env: String,
    /// Host directory plugins are installed under. Used to derive the
    /// plugin basename; when unset the basename is `{slug}/{file name}`.
    #[serde(default)]
    pub plugins_dir: Option<PathBuf>,
    /// Hook the host fires once every plugin has been loaded.
    #[serde(default = "default_loaded_hook")]
    pub plugins_loaded_hook: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            guard_env: default_guard_env(),
            plugins_dir: None,
            plugins_loaded_hook: default_loaded_hook(),
        }
    }
}

fn default_guard_env() -> String {
    "ABSPATH".to_string()
}

fn default_loaded_hook() -> String {
    "plugins_loaded".to_string()
}
