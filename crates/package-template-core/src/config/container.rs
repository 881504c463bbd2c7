//! Write-once configuration container.
//!
//! The container is populated exactly once, during bootstrap, and is
//! immutable afterwards. Later initialization attempts are ignored: they
//! neither fail nor overwrite. Reads never fail; a missing key, or a
//! container that was never initialized, reads as `None`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;
use tracing::debug;

/// Recognized configuration keys.
pub mod keys {
    /// Released plugin version.
    pub const VERSION: &str = "version";
    /// Absolute path of the plugin main file.
    pub const PLUGIN_FILE: &str = "plugin_file";
    /// Plugin file path relative to the host plugin directory.
    pub const PLUGIN_BASENAME: &str = "plugin_basename";
    /// Plugin slug.
    pub const PLUGIN_SLUG: &str = "plugin_slug";
    /// Option-name prefix.
    pub const PREFIX: &str = "prefix";

    /// Every key the plugin itself reads.
    pub const RECOGNIZED: [&str; 5] = [VERSION, PLUGIN_FILE, PLUGIN_BASENAME, PLUGIN_SLUG, PREFIX];
}

/// Process-lifetime key/value configuration, initialized once.
#[derive(Debug, Default)]
pub struct ConfigContainer {
    /// Backing store, set by the first `init` call.
    entries: OnceLock<HashMap<String, Value>>,
}

impl ConfigContainer {
    /// Creates an uninitialized container.
    pub fn new() -> Self {
        Self {
            entries: OnceLock::new(),
        }
    }

    /// Starts a builder for the recognized keys.
    pub fn builder() -> ConfigContainerBuilder {
        ConfigContainerBuilder::default()
    }

    /// Initializes the container with `data`.
    ///
    /// Only the first call has an effect. Returns `true` when this call
    /// populated the container.
    pub fn init(&self, data: HashMap<String, Value>) -> bool {
        let mut initialized = false;
        self.entries.get_or_init(|| {
            initialized = true;
            data
        });

        if !initialized {
            debug!("Config container already initialized, ignoring init");
        }

        initialized
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get().and_then(|entries| entries.get(name))
    }

    /// Returns the value stored under `name` if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.entries.get().is_some()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.get().map(HashMap::len).unwrap_or(0)
    }

    /// Whether the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects configuration entries and initializes a container in one call.
#[derive(Debug, Default)]
pub struct ConfigContainerBuilder {
    entries: HashMap<String, Value>,
}

impl ConfigContainerBuilder {
    /// Sets the plugin version.
    pub fn version(self, version: impl Into<String>) -> Self {
        self.entry(keys::VERSION, Value::String(version.into()))
    }

    /// Sets the plugin main file path.
    pub fn plugin_file(self, file: &Path) -> Self {
        self.entry(
            keys::PLUGIN_FILE,
            Value::String(file.to_string_lossy().into_owned()),
        )
    }

    /// Sets the plugin basename.
    pub fn plugin_basename(self, basename: impl Into<String>) -> Self {
        self.entry(keys::PLUGIN_BASENAME, Value::String(basename.into()))
    }

    /// Sets the plugin slug.
    pub fn plugin_slug(self, slug: impl Into<String>) -> Self {
        self.entry(keys::PLUGIN_SLUG, Value::String(slug.into()))
    }

    /// Sets the option-name prefix.
    pub fn prefix(self, prefix: impl Into<String>) -> Self {
        self.entry(keys::PREFIX, Value::String(prefix.into()))
    }

    /// Adds an arbitrary entry.
    pub fn entry(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entries.insert(name.into(), value);
        self
    }

    /// Builds an initialized container.
    pub fn build(self) -> ConfigContainer {
        let container = ConfigContainer::new();
        container.init(self.entries);
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_first_init_wins() {
        let container = ConfigContainer::new();
        assert!(container.init(data(&[
            ("version", json!("1.0.0")),
            ("prefix", json!("wpmpt_")),
        ])));
        assert_eq!(container.get("version"), Some(&json!("1.0.0")));
        assert_eq!(container.get("missing"), None);

        assert!(!container.init(data(&[("version", json!("2.0.0"))])));
        assert_eq!(container.get("version"), Some(&json!("1.0.0")));
        assert_eq!(container.get_str("prefix"), Some("wpmpt_"));
    }

    #[test]
    fn test_second_init_does_not_merge() {
        let container = ConfigContainer::new();
        container.init(data(&[("version", json!("1.0.0"))]));
        container.init(data(&[("plugin_slug", json!("other"))]));

        assert_eq!(container.get("plugin_slug"), None);
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_get_before_init_is_none() {
        let container = ConfigContainer::new();
        assert!(!container.is_initialized());
        for key in keys::RECOGNIZED {
            assert_eq!(container.get(key), None);
        }
        assert!(container.is_empty());
    }

    #[test]
    fn test_empty_init_still_locks() {
        let container = ConfigContainer::new();
        assert!(container.init(HashMap::new()));
        assert!(container.is_initialized());

        assert!(!container.init(data(&[("version", json!("1.0.0"))])));
        assert_eq!(container.get("version"), None);
    }

    #[test]
    fn test_unrecognized_keys_are_kept() {
        let container = ConfigContainer::new();
        container.init(data(&[("custom", json!({"nested": [1, 2]}))]));
        assert_eq!(container.get("custom"), Some(&json!({"nested": [1, 2]})));
        assert_eq!(container.get_str("custom"), None);
    }

    #[test]
    fn test_builder_sets_recognized_keys() {
        let container = ConfigContainer::builder()
            .version("1.0.0")
            .plugin_file(Path::new("/srv/plugins/package-template/plugin"))
            .plugin_basename("package-template/plugin")
            .plugin_slug("package-template")
            .prefix("wpmpt_")
            .build();

        assert!(container.is_initialized());
        assert_eq!(container.len(), keys::RECOGNIZED.len());
        assert_eq!(
            container.get_str(keys::PLUGIN_BASENAME),
            Some("package-template/plugin")
        );
        assert!(!container.init(data(&[(keys::PREFIX, json!("other_"))])));
        assert_eq!(container.get_str(keys::PREFIX), Some("wpmpt_"));
    }
}
