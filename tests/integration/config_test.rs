//! Integration tests for configuration bootstrap.

mod helpers;

use std::collections::HashMap;

use serde_json::json;

use package_template::bootstrap;
use package_template_core::config::AppConfig;
use package_template_core::config::container::keys;

#[tokio::test]
async fn test_bootstrap_populates_recognized_keys() {
    let host = helpers::TestHost::new().await;
    let config = &host.booted.config;

    assert_eq!(config.get_str(keys::VERSION), Some("1.0.0"));
    assert_eq!(config.get_str(keys::PLUGIN_SLUG), Some("package-template"));
    assert_eq!(config.get_str(keys::PREFIX), Some("wpmpt_"));
    assert_eq!(
        config.get_str(keys::PLUGIN_BASENAME),
        Some("package-template/plugin")
    );
    assert_eq!(
        config.get_str(keys::PLUGIN_FILE),
        Some("/srv/www/plugins/package-template/plugin")
    );
    assert_eq!(config.get("missing"), None);
}

#[tokio::test]
async fn test_container_ignores_later_init() {
    let host = helpers::TestHost::new().await;
    let config = &host.booted.config;

    let mut replacement = HashMap::new();
    replacement.insert(keys::VERSION.to_string(), json!("2.0.0"));
    assert!(!config.init(replacement));

    assert_eq!(config.get_str(keys::VERSION), Some("1.0.0"));
}

#[tokio::test]
async fn test_activation_hooks_use_basename() {
    let host = helpers::TestHost::new().await;

    assert_eq!(host.booted.load_hook, "plugins_loaded");
    assert_eq!(
        host.booted.activation_hook,
        "activate_package-template/plugin"
    );
    assert_eq!(
        host.booted.deactivation_hook,
        "deactivate_package-template/plugin"
    );
}

#[tokio::test]
async fn test_options_use_configured_prefix() {
    let mut config = helpers::test_config();
    config.plugin.prefix = "custom_".to_string();
    let host = helpers::TestHost::with_config(config).await;
    host.plugins_loaded().await;

    let components = host.booted.plugin.components().await.unwrap();
    components.options.set("enabled", json!(true));
    assert_eq!(components.options.option_name("enabled"), "custom_enabled");
    assert_eq!(components.options.get("enabled"), Some(json!(true)));
}

#[test]
fn test_settings_file_feeds_container() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("default.toml"),
        "[plugin]\nversion = \"3.2.1\"\nslug = \"demo\"\nfile = \"/opt/demo/main\"\n",
    )
    .unwrap();

    let settings = AppConfig::load_from(dir.path(), "test").unwrap();
    let container = bootstrap::build_config(&settings).unwrap();

    assert_eq!(container.get_str(keys::VERSION), Some("3.2.1"));
    assert_eq!(container.get_str(keys::PLUGIN_BASENAME), Some("demo/main"));
}
