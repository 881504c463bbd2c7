//! Package template — plugin entry point.
//!
//! Runs the bootstrap with an in-process host: builds the hook API, binds
//! the plugin to it, then fires the host lifecycle hooks.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use package_template::bootstrap::{self, LIFECYCLE_ENV};
use package_template_core::config::AppConfig;
use package_template_core::config::logging::LoggingConfig;
use package_template_core::error::AppError;
use package_template_plugin::HookDispatcher;

#[tokio::main]
async fn main() {
    if let Err(e) = bootstrap::early_guard() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let env = std::env::var("PKGTPL_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // A config file may rename the marker
    if let Err(e) = bootstrap::guard(&config.host) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    init_logging(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!("Plugin error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Binds the plugin, then plays the host: fires load and any requested
/// lifecycle signals in order.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting {} v{}",
        config.plugin.slug,
        config.plugin.version
    );

    let hooks = Arc::new(HookDispatcher::default());
    let booted = bootstrap::bootstrap(&config, hooks.clone()).await?;

    let mut fired = vec![booted.load_hook.clone()];
    for signal in requested_signals() {
        match signal.as_str() {
            "activate" => fired.push(booted.activation_hook.clone()),
            "deactivate" => fired.push(booted.deactivation_hook.clone()),
            other => tracing::warn!("Ignoring unknown lifecycle signal '{}'", other),
        }
    }

    for hook in &fired {
        let result = hooks.trigger(hook, Vec::new()).await;
        if !result.is_ok() {
            return Err(AppError::plugin(format!(
                "Host hook '{}' failed: {}",
                hook, result.failures[0].message
            )));
        }
    }

    tracing::info!(
        state = %booted.plugin.state().await,
        "Plugin lifecycle complete"
    );

    Ok(())
}

fn requested_signals() -> Vec<String> {
    std::env::var(LIFECYCLE_ENV)
        .map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
