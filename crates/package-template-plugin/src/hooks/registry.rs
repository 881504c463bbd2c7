//! Hook registry — handlers are registered by hook name with priority ordering.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::definitions::HookHandler;

/// Entry in the hook registry.
#[derive(Debug)]
struct HookEntry {
    /// The handler.
    handler: Arc<dyn HookHandler>,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// How many hook arguments the handler receives.
    accepted_args: usize,
    /// Component that registered this handler.
    owner: String,
}

/// A handler as seen by the dispatcher, with its registration parameters.
#[derive(Debug, Clone)]
pub struct RegisteredHandler {
    /// The handler.
    pub handler: Arc<dyn HookHandler>,
    /// Priority it was registered with.
    pub priority: i32,
    /// Accepted argument count it was registered with.
    pub accepted_args: usize,
    /// Owning component.
    pub owner: String,
}

/// Registry of hook handlers organized by hook name.
#[derive(Debug)]
pub struct HookRegistry {
    /// Hook name → handlers sorted by priority, then registration order.
    handlers: RwLock<HashMap<String, Vec<HookEntry>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler for a hook, owned by the handler's own owner.
    pub async fn register(
        &self,
        hook: &str,
        handler: Arc<dyn HookHandler>,
        priority: i32,
        accepted_args: usize,
    ) {
        let owner = handler.owner().to_string();
        self.register_as(&owner, hook, handler, priority, accepted_args)
            .await;
    }

    /// Registers a handler for a hook on behalf of `owner`.
    pub async fn register_as(
        &self,
        owner: &str,
        hook: &str,
        handler: Arc<dyn HookHandler>,
        priority: i32,
        accepted_args: usize,
    ) {
        let mut handlers = self.handlers.write().await;
        let entries = handlers.entry(hook.to_string()).or_default();

        entries.push(HookEntry {
            handler,
            priority,
            accepted_args,
            owner: owner.to_string(),
        });

        // Stable sort keeps registration order within a priority
        entries.sort_by_key(|e| e.priority);

        debug!(
            hook = %hook,
            owner = %owner,
            priority = priority,
            accepted_args = accepted_args,
            "Hook handler registered"
        );
    }

    /// Unregisters all handlers owned by `owner`. Returns how many were removed.
    pub async fn unregister_owner(&self, owner: &str) -> usize {
        let mut handlers = self.handlers.write().await;
        let mut removed = 0;

        for entries in handlers.values_mut() {
            let before = entries.len();
            entries.retain(|e| e.owner != owner);
            removed += before - entries.len();
        }

        handlers.retain(|_, entries| !entries.is_empty());

        info!(owner = %owner, removed = removed, "Hook handlers unregistered");
        removed
    }

    /// Returns all handlers for a hook, in execution order.
    pub async fn get_handlers(&self, hook: &str) -> Vec<RegisteredHandler> {
        let handlers = self.handlers.read().await;
        handlers
            .get(hook)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| RegisteredHandler {
                        handler: e.handler.clone(),
                        priority: e.priority,
                        accepted_args: e.accepted_args,
                        owner: e.owner.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns whether any handlers are registered for a hook.
    pub async fn has_handlers(&self, hook: &str) -> bool {
        let handlers = self.handlers.read().await;
        handlers
            .get(hook)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of handlers registered for a hook.
    pub async fn handler_count(&self, hook: &str) -> usize {
        let handlers = self.handlers.read().await;
        handlers.get(hook).map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns the total number of handlers across all hooks.
    pub async fn total_handlers(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers.values().map(Vec::len).sum()
    }

    /// Returns all hooks with at least one handler.
    pub async fn registered_hooks(&self) -> Vec<String> {
        let handlers = self.handlers.read().await;
        handlers.keys().cloned().collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
