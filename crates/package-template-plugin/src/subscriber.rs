//! Event subscriber capability.
//!
//! A subscriber declares, once at registration time, which hooks it wants
//! and which handler serves each of them. The declaration is static: it is
//! not re-evaluated when hooks fire.

use std::sync::Arc;

use crate::hooks::definitions::{DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookHandler};

/// How a subscriber names the handler for one event.
///
/// Mirrors the three declaration shapes hosts accept: a bare handler name,
/// a name with a priority, or a name with a priority and an argument count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerSpec {
    /// Handler name, default priority and argument count.
    Name(String),
    /// Handler name and priority.
    WithPriority(String, i32),
    /// Handler name, priority and accepted argument count.
    WithArgs(String, i32, usize),
}

impl HandlerSpec {
    /// Handler name.
    pub fn method(&self) -> &str {
        match self {
            Self::Name(name) | Self::WithPriority(name, _) | Self::WithArgs(name, _, _) => name,
        }
    }

    /// Declared priority, or the default.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Name(_) => DEFAULT_PRIORITY,
            Self::WithPriority(_, priority) | Self::WithArgs(_, priority, _) => *priority,
        }
    }

    /// Declared accepted argument count, or the default.
    pub fn accepted_args(&self) -> usize {
        match self {
            Self::WithArgs(_, _, accepted) => *accepted,
            _ => DEFAULT_ACCEPTED_ARGS,
        }
    }
}

impl From<&str> for HandlerSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<(&str, i32)> for HandlerSpec {
    fn from((name, priority): (&str, i32)) -> Self {
        Self::WithPriority(name.to_string(), priority)
    }
}

impl From<(&str, i32, usize)> for HandlerSpec {
    fn from((name, priority, accepted): (&str, i32, usize)) -> Self {
        Self::WithArgs(name.to_string(), priority, accepted)
    }
}

/// One event binding declared by a subscriber.
#[derive(Debug, Clone)]
pub struct Subscription {
    /// Hook to bind to.
    pub event: String,
    /// Handler invoked when the hook fires.
    pub handler: Arc<dyn HookHandler>,
    /// Priority (lower = runs earlier).
    pub priority: i32,
    /// How many hook arguments the handler receives.
    pub accepted_args: usize,
    /// Handler name, when declared through a [`HandlerSpec`].
    pub method: Option<String>,
}

impl Subscription {
    /// Creates a subscription with default priority and argument count.
    pub fn new(event: &str, handler: Arc<dyn HookHandler>) -> Self {
        Self {
            event: event.to_string(),
            handler,
            priority: DEFAULT_PRIORITY,
            accepted_args: DEFAULT_ACCEPTED_ARGS,
            method: None,
        }
    }

    /// Creates a subscription from a declared handler spec and its resolved handler.
    pub fn from_spec(event: &str, spec: &HandlerSpec, handler: Arc<dyn HookHandler>) -> Self {
        Self {
            event: event.to_string(),
            handler,
            priority: spec.priority(),
            accepted_args: spec.accepted_args(),
            method: Some(spec.method().to_string()),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the accepted argument count.
    pub fn with_accepted_args(mut self, accepted_args: usize) -> Self {
        self.accepted_args = accepted_args;
        self
    }
}

/// Capability of components that react to host events.
pub trait EventSubscriber: Send + Sync + std::fmt::Debug {
    /// Name identifying the subscriber's bindings in the hook registry.
    fn name(&self) -> &str;

    /// Returns the events this subscriber binds to.
    fn subscribed_events(&self) -> Vec<Subscription>;
}

/// Starting point for the plugin's own subscriber. Declares no events.
#[derive(Debug, Default, Clone)]
pub struct TemplateSubscriber;

impl TemplateSubscriber {
    /// Creates the subscriber.
    pub fn new() -> Self {
        Self
    }
}

impl EventSubscriber for TemplateSubscriber {
    fn name(&self) -> &str {
        "package_template_subscriber"
    }

    fn subscribed_events(&self) -> Vec<Subscription> {
        Vec::new()
    }
}
