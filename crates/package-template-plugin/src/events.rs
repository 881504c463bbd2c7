//! Event manager — binds subscribers to the host hook API.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use package_template_core::{AppError, AppResult};

use crate::hooks::definitions::{HookHandler, MAX_ACCEPTED_ARGS};
use crate::hooks::dispatcher::{DispatchResult, HookDispatcher};
use crate::subscriber::{EventSubscriber, Subscription};

/// Registers subscribers and callbacks with the host's hook dispatcher.
#[derive(Debug, Clone)]
pub struct EventManager {
    /// Host hook API.
    hooks: Arc<HookDispatcher>,
}

impl EventManager {
    /// Creates an event manager bound to the host hook API.
    pub fn new(hooks: Arc<HookDispatcher>) -> Self {
        Self { hooks }
    }

    /// Registers every subscription a subscriber declares.
    ///
    /// All subscriptions are validated first; if any is invalid, nothing is
    /// registered. Returns the number of bindings made.
    pub async fn add_subscriber(&self, subscriber: &dyn EventSubscriber) -> AppResult<usize> {
        let subscriptions = subscriber.subscribed_events();

        for subscription in &subscriptions {
            validate(subscriber.name(), subscription)?;
        }

        for subscription in &subscriptions {
            self.hooks
                .registry()
                .register_as(
                    subscriber.name(),
                    &subscription.event,
                    subscription.handler.clone(),
                    subscription.priority,
                    subscription.accepted_args,
                )
                .await;
        }

        info!(
            subscriber = %subscriber.name(),
            bindings = subscriptions.len(),
            "Subscriber registered"
        );

        Ok(subscriptions.len())
    }

    /// Removes every binding a subscriber made.
    pub async fn remove_subscriber(&self, subscriber: &dyn EventSubscriber) -> usize {
        self.hooks
            .registry()
            .unregister_owner(subscriber.name())
            .await
    }

    /// Registers a single callback.
    pub async fn add_callback(
        &self,
        event: &str,
        handler: Arc<dyn HookHandler>,
        priority: i32,
        accepted_args: usize,
    ) {
        self.hooks
            .register(event, handler, priority, accepted_args)
            .await;
    }

    /// Whether anything is bound to `event`.
    pub async fn has_callbacks(&self, event: &str) -> bool {
        self.hooks.registry().has_handlers(event).await
    }

    /// Fires `event` through the host hook API.
    pub async fn trigger(&self, event: &str, args: Vec<Value>) -> DispatchResult {
        debug!(event = %event, args = args.len(), "Triggering event");
        self.hooks.trigger(event, args).await
    }

    /// Returns the host hook API this manager is bound to.
    pub fn hooks(&self) -> &Arc<HookDispatcher> {
        &self.hooks
    }
}

fn validate(subscriber: &str, subscription: &Subscription) -> AppResult<()> {
    if subscription.event.trim().is_empty() {
        return Err(AppError::plugin(format!(
            "Subscriber '{subscriber}' declared a subscription with an empty event name"
        )));
    }

    if subscription.accepted_args > MAX_ACCEPTED_ARGS {
        return Err(AppError::plugin(format!(
            "Subscriber '{}' accepts {} arguments on '{}', the limit is {}",
            subscriber, subscription.accepted_args, subscription.event, MAX_ACCEPTED_ARGS
        )));
    }

    Ok(())
}
