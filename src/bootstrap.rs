//! Host integration glue.
//!
//! Checks the host guard, builds the configuration container once,
//! constructs the lifecycle controller and binds its load / activate /
//! deactivate methods to the host hooks.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use package_template_core::config::AppConfig;
use package_template_core::config::host::HostConfig;
use package_template_core::{AppError, AppResult, ConfigContainer};
use package_template_plugin::hooks::definitions::{DEFAULT_PRIORITY, HookHandler, HookPayload};
use package_template_plugin::{HookDispatcher, Plugin};

/// Owner name for the lifecycle bindings in the hook registry.
pub const HOOK_OWNER: &str = "package-template";

/// Environment variable listing extra lifecycle signals for the binary to fire.
pub const LIFECYCLE_ENV: &str = "PKGTPL_LIFECYCLE";

/// Environment variable renaming the guard marker, read before any
/// configuration file.
pub const GUARD_ENV_OVERRIDE: &str = "PKGTPL__HOST__GUARD_ENV";

/// Guard check run before the configuration is loaded.
///
/// The marker name comes from [`GUARD_ENV_OVERRIDE`] when set, otherwise
/// from the built-in default.
pub fn early_guard() -> AppResult<()> {
    early_guard_with(|name| std::env::var_os(name))
}

/// [`early_guard`] reading the environment through `lookup`.
pub fn early_guard_with<F>(lookup: F) -> AppResult<()>
where
    F: Fn(&str) -> Option<OsString>,
{
    let mut host = HostConfig::default();
    if let Some(name) = lookup(GUARD_ENV_OVERRIDE).and_then(|name| name.into_string().ok()) {
        host.guard_env = name;
    }
    guard_with(&host, lookup)
}

/// Fails unless the host guard marker is present in the environment.
pub fn guard(host: &HostConfig) -> AppResult<()> {
    guard_with(host, |name| std::env::var_os(name))
}

/// Fails unless `lookup` finds the host guard marker.
pub fn guard_with<F>(host: &HostConfig, lookup: F) -> AppResult<()>
where
    F: Fn(&str) -> Option<OsString>,
{
    match lookup(&host.guard_env) {
        Some(_) => Ok(()),
        None => Err(AppError::guard(format!(
            "'{}' is not set, refusing to run outside the host",
            host.guard_env
        ))),
    }
}

/// Plugin file path relative to the host plugin directory, `/`-separated.
///
/// Falls back to `{slug}/{file name}` when the file is not under `plugins_dir`.
pub fn plugin_basename(file: &Path, plugins_dir: Option<&Path>, slug: &str) -> String {
    if let Some(relative) = plugins_dir.and_then(|dir| file.strip_prefix(dir).ok()) {
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if !parts.is_empty() {
            return parts.join("/");
        }
    }

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{slug}/{name}")
}

/// Hook the host fires when the plugin is activated.
pub fn activation_hook(basename: &str) -> String {
    format!("activate_{basename}")
}

/// Hook the host fires when the plugin is deactivated.
pub fn deactivation_hook(basename: &str) -> String {
    format!("deactivate_{basename}")
}

/// Builds the configuration container from the loaded settings.
pub fn build_config(config: &AppConfig) -> AppResult<ConfigContainer> {
    let file = match &config.plugin.file {
        Some(file) => file.clone(),
        None => plugin_file()?,
    };
    let basename = plugin_basename(
        &file,
        config.host.plugins_dir.as_deref(),
        &config.plugin.slug,
    );

    Ok(ConfigContainer::builder()
        .version(config.plugin.version.clone())
        .plugin_file(&file)
        .plugin_basename(basename)
        .plugin_slug(config.plugin.slug.clone())
        .prefix(config.plugin.prefix.clone())
        .build())
}

fn plugin_file() -> AppResult<PathBuf> {
    std::env::current_exe().map_err(|e| {
        AppError::with_source(
            package_template_core::error::ErrorKind::Configuration,
            "Cannot resolve the plugin file",
            e,
        )
    })
}

/// Which controller method a binding forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    /// `Plugin::load`.
    Load,
    /// `Plugin::activate`.
    Activate,
    /// `Plugin::deactivate`.
    Deactivate,
}

/// Hook handler forwarding a host signal to the controller.
#[derive(Debug)]
pub struct LifecycleHook {
    plugin: Arc<Plugin>,
    signal: LifecycleSignal,
}

impl LifecycleHook {
    /// Creates a binding for `signal`.
    pub fn new(plugin: Arc<Plugin>, signal: LifecycleSignal) -> Self {
        Self { plugin, signal }
    }
}

#[async_trait]
impl HookHandler for LifecycleHook {
    async fn handle(&self, _payload: &HookPayload) -> AppResult<()> {
        match self.signal {
            LifecycleSignal::Load => self.plugin.load().await,
            LifecycleSignal::Activate => self.plugin.activate().await,
            LifecycleSignal::Deactivate => self.plugin.deactivate().await,
        }
    }

    fn owner(&self) -> &str {
        HOOK_OWNER
    }
}

/// Everything the bootstrap wired up.
#[derive(Debug, Clone)]
pub struct Bootstrapped {
    /// Plugin configuration.
    pub config: Arc<ConfigContainer>,
    /// Lifecycle controller.
    pub plugin: Arc<Plugin>,
    /// Host hook firing `load`.
    pub load_hook: String,
    /// Host hook firing `activate`.
    pub activation_hook: String,
    /// Host hook firing `deactivate`.
    pub deactivation_hook: String,
}

/// Builds the plugin and binds it to `hooks`.
pub async fn bootstrap(config: &AppConfig, hooks: Arc<HookDispatcher>) -> AppResult<Bootstrapped> {
    let container = Arc::new(build_config(config)?);
    let plugin = Arc::new(
        Plugin::new(container.clone(), hooks.clone())
            .with_loaded_signal(config.plugin.loaded_signal.clone()),
    );

    Ok(bind(config, container, plugin, hooks).await)
}

/// Binds an already constructed controller to the host hooks.
pub async fn bind(
    config: &AppConfig,
    container: Arc<ConfigContainer>,
    plugin: Arc<Plugin>,
    hooks: Arc<HookDispatcher>,
) -> Bootstrapped {
    let basename = container
        .get_str(package_template_core::config::container::keys::PLUGIN_BASENAME)
        .unwrap_or_default()
        .to_string();

    let load_hook = config.host.plugins_loaded_hook.clone();
    let activation_hook = activation_hook(&basename);
    let deactivation_hook = deactivation_hook(&basename);

    for (hook, signal) in [
        (&load_hook, LifecycleSignal::Load),
        (&activation_hook, LifecycleSignal::Activate),
        (&deactivation_hook, LifecycleSignal::Deactivate),
    ] {
        hooks
            .register(
                hook,
                Arc::new(LifecycleHook::new(plugin.clone(), signal)),
                DEFAULT_PRIORITY,
                0,
            )
            .await;
    }

    info!(
        basename = %basename,
        load_hook = %load_hook,
        "Plugin bound to host lifecycle hooks"
    );

    Bootstrapped {
        config: container,
        plugin,
        load_hook,
        activation_hook,
        deactivation_hook,
    }
}
