//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use package_template::bootstrap::{self, Bootstrapped};
use package_template_core::config::AppConfig;
use package_template_plugin::HookDispatcher;
use package_template_plugin::hooks::dispatcher::DispatchResult;

/// Plugin directory the test host pretends to serve.
pub const PLUGINS_DIR: &str = "/srv/www/plugins";

/// Test host with the plugin bootstrapped onto it.
pub struct TestHost {
    /// Host hook API
    pub hooks: Arc<HookDispatcher>,
    /// Bootstrapped plugin
    pub booted: Bootstrapped,
    /// Settings the plugin was bootstrapped with
    pub config: AppConfig,
}

impl TestHost {
    /// Bootstrap the plugin with default settings
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Bootstrap the plugin with the given settings
    pub async fn with_config(config: AppConfig) -> Self {
        let hooks = Arc::new(HookDispatcher::default());
        let booted = bootstrap::bootstrap(&config, hooks.clone())
            .await
            .expect("Failed to bootstrap plugin");

        Self {
            hooks,
            booted,
            config,
        }
    }

    /// Fire the host's "all plugins loaded" hook
    pub async fn plugins_loaded(&self) -> DispatchResult {
        self.hooks.trigger(&self.booted.load_hook, Vec::new()).await
    }

    /// Fire the host's activation hook for the plugin
    pub async fn activate(&self) -> DispatchResult {
        self.hooks
            .trigger(&self.booted.activation_hook, Vec::new())
            .await
    }

    /// Fire the host's deactivation hook for the plugin
    pub async fn deactivate(&self) -> DispatchResult {
        self.hooks
            .trigger(&self.booted.deactivation_hook, Vec::new())
            .await
    }

    /// How many times the plugin announced it finished loading
    pub fn loaded_signals(&self) -> usize {
        self.hooks.did_action(&self.config.plugin.loaded_signal)
    }
}

/// Settings with a plugin file under [`PLUGINS_DIR`]
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.plugin.file = Some(PathBuf::from(PLUGINS_DIR).join("package-template/plugin"));
    config.host.plugins_dir = Some(PathBuf::from(PLUGINS_DIR));
    config
}
