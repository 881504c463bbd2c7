//! Hook dispatcher — fires hooks and records what happened.
//!
//! - Handlers are called in priority order, one at a time.
//! - Each handler sees only its first `accepted_args` arguments.
//! - A failing handler is logged and recorded; the remaining handlers still run.
//! - Every firing is counted, whether or not anything is listening.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, error};

use super::definitions::{HookHandler, HookPayload};
use super::registry::HookRegistry;

/// A handler that returned an error during dispatch.
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    /// Owner of the failing handler.
    pub owner: String,
    /// Error message.
    pub message: String,
}

/// Aggregated result of dispatching a hook to all handlers.
#[derive(Debug, Clone, Default)]
pub struct DispatchResult {
    /// Number of handlers invoked.
    pub invoked: usize,
    /// Handlers that returned an error.
    pub failures: Vec<HandlerFailure>,
}

impl DispatchResult {
    /// Whether every handler succeeded.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Host hook API: registration pass-through plus synchronous dispatch.
#[derive(Debug)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
    /// Hook name → number of times it has been fired.
    fired: DashMap<String, usize>,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self {
            registry,
            fired: DashMap::new(),
        }
    }

    /// Registers a handler on the underlying registry.
    pub async fn register(
        &self,
        hook: &str,
        handler: Arc<dyn HookHandler>,
        priority: i32,
        accepted_args: usize,
    ) {
        self.registry
            .register(hook, handler, priority, accepted_args)
            .await;
    }

    /// Fires `hook` with positional `args`.
    pub async fn trigger(&self, hook: &str, args: Vec<Value>) -> DispatchResult {
        let payload = HookPayload::new(hook).with_args(args);
        self.dispatch(&payload).await
    }

    /// Dispatches a payload to all handlers registered for its hook.
    pub async fn dispatch(&self, payload: &HookPayload) -> DispatchResult {
        *self.fired.entry(payload.hook.clone()).or_insert(0) += 1;

        // Snapshot so handlers may register or fire hooks themselves
        let handlers = self.registry.get_handlers(&payload.hook).await;

        if handlers.is_empty() {
            return DispatchResult::default();
        }

        debug!(
            hook = %payload.hook,
            handler_count = handlers.len(),
            "Dispatching hook"
        );

        let mut result = DispatchResult::default();

        for entry in &handlers {
            let scoped = payload.truncated(entry.accepted_args);
            result.invoked += 1;

            if let Err(e) = entry.handler.handle(&scoped).await {
                error!(
                    hook = %payload.hook,
                    owner = %entry.owner,
                    error = %e,
                    "Hook handler failed"
                );
                result.failures.push(HandlerFailure {
                    owner: entry.owner.clone(),
                    message: e.to_string(),
                });
            }
        }

        result
    }

    /// Returns how many times `hook` has been fired.
    pub fn did_action(&self, hook: &str) -> usize {
        self.fired.get(hook).map(|count| *count).unwrap_or(0)
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

impl Default for HookDispatcher {
    fn default() -> Self {
        Self::new(Arc::new(HookRegistry::new()))
    }
}
