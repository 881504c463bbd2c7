//! Plugin identity settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identity of the plugin as seen by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Released plugin version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Plugin main file. Defaults to the running executable.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Plugin slug.
    #[serde(default = "default_slug")]
    pub slug: String,
    /// Prefix applied to every option name the plugin stores.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Internal signal emitted once the plugin finished loading.
    #[serde(default = "default_loaded_signal")]
    pub loaded_signal: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            file: None,
            slug: default_slug(),
            prefix: default_prefix(),
            loaded_signal: default_loaded_signal(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_slug() -> String {
    "package-template".to_string()
}

fn default_prefix() -> String {
    "wpmpt_".to_string()
}

fn default_loaded_signal() -> String {
    "wpmedia_package_template_loaded".to_string()
}
