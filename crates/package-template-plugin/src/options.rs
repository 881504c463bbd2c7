//! Prefix-scoped access to the host option store.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

/// Host option API.
pub trait OptionStore: Send + Sync + std::fmt::Debug {
    /// Reads an option by its full name.
    fn get(&self, name: &str) -> Option<Value>;

    /// Writes an option by its full name.
    fn set(&self, name: &str, value: Value);

    /// Deletes an option. Returns whether it existed.
    fn delete(&self, name: &str) -> bool;
}

/// In-process option store.
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    values: DashMap<String, Value>,
}

impl MemoryOptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).map(|v| v.value().clone())
    }

    fn set(&self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    fn delete(&self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }
}

/// Option accessor that namespaces every name with the plugin prefix.
#[derive(Debug, Clone)]
pub struct Options {
    prefix: String,
    store: Arc<dyn OptionStore>,
}

impl Options {
    /// Creates an accessor over `store` scoped to `prefix`.
    pub fn new(prefix: impl Into<String>, store: Arc<dyn OptionStore>) -> Self {
        Self {
            prefix: prefix.into(),
            store,
        }
    }

    /// Full option name for `name`.
    pub fn option_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Reads an option.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.store.get(&self.option_name(name))
    }

    /// Reads an option, falling back to `default`.
    pub fn get_or(&self, name: &str, default: Value) -> Value {
        self.get(name).unwrap_or(default)
    }

    /// Writes an option.
    pub fn set(&self, name: &str, value: Value) {
        self.store.set(&self.option_name(name), value);
    }

    /// Deletes an option.
    pub fn delete(&self, name: &str) -> bool {
        self.store.delete(&self.option_name(name))
    }

    /// The prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}
