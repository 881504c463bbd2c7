//! Integration tests for the host-driven plugin lifecycle.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use package_template::bootstrap;
use package_template_plugin::prelude::*;
use package_template_plugin::{HookDispatcher, LifecycleState};

#[tokio::test]
async fn test_plugins_loaded_emits_package_loaded_once() {
    let host = helpers::TestHost::new().await;
    assert_eq!(host.loaded_signals(), 0);

    let result = host.plugins_loaded().await;

    assert!(result.is_ok());
    assert_eq!(result.invoked, 1);
    assert_eq!(host.loaded_signals(), 1);
    assert_eq!(host.booted.plugin.state().await, LifecycleState::Loaded);
}

#[tokio::test]
async fn test_repeated_plugins_loaded_is_passed_through() {
    let host = helpers::TestHost::new().await;

    host.plugins_loaded().await;
    host.plugins_loaded().await;

    assert_eq!(host.loaded_signals(), 2);
    assert_eq!(host.booted.plugin.state().await, LifecycleState::Loaded);
}

#[tokio::test]
async fn test_loaded_listener_observes_loaded_state() {
    let host = helpers::TestHost::new().await;
    let plugin = host.booted.plugin.clone();
    let observed = Arc::new(tokio::sync::Mutex::new(None));

    let slot = observed.clone();
    host.hooks
        .register(
            &host.config.plugin.loaded_signal,
            Arc::new(ClosureHandler::new("observer", move |_| {
                let plugin = plugin.clone();
                let slot = slot.clone();
                async move {
                    *slot.lock().await = Some(plugin.state().await);
                    Ok(())
                }
            })),
            DEFAULT_PRIORITY,
            0,
        )
        .await;

    host.plugins_loaded().await;
    assert_eq!(*observed.lock().await, Some(LifecycleState::Loaded));
}

#[tokio::test]
async fn test_template_subscriber_binds_no_events() {
    let host = helpers::TestHost::new().await;
    host.plugins_loaded().await;

    let components = host.booted.plugin.components().await.unwrap();
    assert_eq!(components.subscribers.len(), 1);
    assert!(components.subscribers[0].subscribed_events().is_empty());

    // Only the three lifecycle bindings exist
    assert_eq!(host.hooks.registry().total_handlers().await, 3);
    assert_eq!(host.hooks.trigger("init", Vec::new()).await.invoked, 0);
}

#[tokio::test]
async fn test_activation_and_deactivation_follow_load() {
    let host = helpers::TestHost::new().await;

    let early = host.activate().await;
    assert_eq!(early.failures.len(), 1);
    assert_eq!(host.booted.plugin.state().await, LifecycleState::Unloaded);

    host.plugins_loaded().await;
    assert!(host.activate().await.is_ok());
    assert_eq!(host.booted.plugin.state().await, LifecycleState::Activated);

    assert!(host.deactivate().await.is_ok());
    assert_eq!(host.booted.plugin.state().await, LifecycleState::Deactivated);

    let reload = host.plugins_loaded().await;
    assert!(!reload.is_ok());
    assert_eq!(host.loaded_signals(), 1);
}

#[derive(Debug)]
struct InitCounter {
    calls: Arc<AtomicUsize>,
}

impl EventSubscriber for InitCounter {
    fn name(&self) -> &str {
        "init_counter"
    }

    fn subscribed_events(&self) -> Vec<Subscription> {
        let calls = self.calls.clone();
        vec![
            Subscription::new(
                "init",
                Arc::new(ClosureHandler::new("init_counter", move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(()) }
                })),
            )
            .with_priority(5),
        ]
    }
}

#[tokio::test]
async fn test_custom_subscriber_is_registered_on_load() {
    let config = helpers::test_config();
    let hooks = Arc::new(HookDispatcher::default());
    let container = Arc::new(bootstrap::build_config(&config).unwrap());
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    let plugin = Arc::new(
        Plugin::new(container.clone(), hooks.clone()).with_subscriber(move |_| {
            Ok(Arc::new(InitCounter {
                calls: counter.clone(),
            }))
        }),
    );
    let booted = bootstrap::bind(&config, container, plugin, hooks.clone()).await;

    hooks.trigger("init", Vec::new()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    hooks.trigger(&booted.load_hook, Vec::new()).await;
    hooks.trigger("init", Vec::new()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(hooks.did_action(&config.plugin.loaded_signal), 1);
}

#[tokio::test]
async fn test_failing_subscriber_aborts_load_without_signal() {
    let config = helpers::test_config();
    let hooks = Arc::new(HookDispatcher::default());
    let container = Arc::new(bootstrap::build_config(&config).unwrap());
    let plugin = Arc::new(
        Plugin::new(container.clone(), hooks.clone()).with_subscriber(|_| {
            Err(package_template_core::AppError::plugin(
                "subscriber dependencies unavailable",
            ))
        }),
    );
    let booted = bootstrap::bind(&config, container, plugin, hooks.clone()).await;

    let result = hooks.trigger(&booted.load_hook, Vec::new()).await;

    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].message.contains("subscriber dependencies unavailable"));
    assert_eq!(booted.plugin.state().await, LifecycleState::Unloaded);
    assert_eq!(hooks.did_action(&config.plugin.loaded_signal), 0);
}
