//! Plugin lifecycle controller.
//!
//! The host drives the controller through three signals:
//!
//! - **load** builds the service container, the event manager and the
//!   option accessor, registers every subscriber, then emits the
//!   "package loaded" signal. A load delivered again while loaded re-emits
//!   the signal without rebuilding anything.
//! - **activate** / **deactivate** run the configured
//!   [`LifecycleExtension`] and move the state.
//!
//! Transitions are checked against [`LifecycleState::can_transition_to`];
//! an illegal one fails and leaves the state untouched. Transitions are
//! serialized, but no lock on the state is held while subscribers or the
//! extension run, so they may call [`Plugin::state`].

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use package_template_core::config::container::keys;
use package_template_core::{AppResult, ConfigContainer};

use crate::container::ServiceContainer;
use crate::events::EventManager;
use crate::hooks::dispatcher::HookDispatcher;
use crate::lifecycle::{LifecycleExtension, LifecycleState, NoopExtension};
use crate::options::{MemoryOptionStore, OptionStore, Options};
use crate::subscriber::{EventSubscriber, TemplateSubscriber};

/// Signal emitted once the plugin finished loading.
pub const DEFAULT_LOADED_SIGNAL: &str = "wpmedia_package_template_loaded";

/// What a subscriber factory can draw on while the plugin loads.
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// Plugin configuration.
    pub config: Arc<ConfigContainer>,
    /// Prefix-scoped options.
    pub options: Arc<Options>,
    /// Shared services.
    pub services: Arc<ServiceContainer>,
}

/// Builds one subscriber during load.
pub type SubscriberFactory =
    Box<dyn Fn(&PluginContext) -> AppResult<Arc<dyn EventSubscriber>> + Send + Sync>;

/// Collaborators built by a successful load.
#[derive(Debug, Clone)]
pub struct LoadedComponents {
    /// Shared services.
    pub services: Arc<ServiceContainer>,
    /// Event manager bound to the host hook API.
    pub events: Arc<EventManager>,
    /// Prefix-scoped options.
    pub options: Arc<Options>,
    /// Registered subscribers.
    pub subscribers: Vec<Arc<dyn EventSubscriber>>,
}

/// Drives the plugin through its lifecycle.
pub struct Plugin {
    /// Plugin configuration.
    config: Arc<ConfigContainer>,
    /// Host hook API.
    hooks: Arc<HookDispatcher>,
    /// Host option store.
    option_store: Arc<dyn OptionStore>,
    /// Name of the signal emitted after load.
    loaded_signal: String,
    /// Subscribers to build on load, in registration order.
    subscribers: Vec<SubscriberFactory>,
    /// Activation / deactivation work.
    extension: Arc<dyn LifecycleExtension>,
    /// Current state.
    state: RwLock<LifecycleState>,
    /// Held for the whole of a transition.
    transition: Mutex<()>,
    /// Populated by load.
    components: RwLock<Option<LoadedComponents>>,
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("loaded_signal", &self.loaded_signal)
            .field("subscribers", &self.subscribers.len())
            .field("extension", &self.extension)
            .finish()
    }
}

impl Plugin {
    /// Creates a controller with the template subscriber and no-op extension.
    pub fn new(config: Arc<ConfigContainer>, hooks: Arc<HookDispatcher>) -> Self {
        let template: SubscriberFactory = Box::new(|_: &PluginContext| {
            Ok(Arc::new(TemplateSubscriber::new()) as Arc<dyn EventSubscriber>)
        });

        Self {
            config,
            hooks,
            option_store: Arc::new(MemoryOptionStore::new()),
            loaded_signal: DEFAULT_LOADED_SIGNAL.to_string(),
            subscribers: vec![template],
            extension: Arc::new(NoopExtension),
            state: RwLock::new(LifecycleState::Unloaded),
            transition: Mutex::new(()),
            components: RwLock::new(None),
        }
    }

    /// Uses `store` as the host option store.
    pub fn with_option_store(mut self, store: Arc<dyn OptionStore>) -> Self {
        self.option_store = store;
        self
    }

    /// Renames the signal emitted after load.
    pub fn with_loaded_signal(mut self, signal: impl Into<String>) -> Self {
        self.loaded_signal = signal.into();
        self
    }

    /// Adds a subscriber to build on load.
    pub fn with_subscriber<F>(mut self, factory: F) -> Self
    where
        F: Fn(&PluginContext) -> AppResult<Arc<dyn EventSubscriber>> + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(factory));
        self
    }

    /// Replaces the full list of subscribers to build on load.
    pub fn with_subscribers(mut self, factories: Vec<SubscriberFactory>) -> Self {
        self.subscribers = factories;
        self
    }

    /// Uses `extension` for activation and deactivation work.
    pub fn with_extension(mut self, extension: Arc<dyn LifecycleExtension>) -> Self {
        self.extension = extension;
        self
    }

    /// Handles the host's "all plugins loaded" signal.
    pub async fn load(&self) -> AppResult<()> {
        let transition = self.transition.lock().await;
        let state = self.state().await;

        match state {
            LifecycleState::Unloaded => {
                let components = self.build_components().await.inspect_err(|e| {
                    error!(error = %e, "Plugin load aborted");
                })?;

                info!(
                    subscribers = components.subscribers.len(),
                    "Plugin components loaded"
                );

                *self.components.write().await = Some(components);
                *self.state.write().await = LifecycleState::Loaded;
            }
            LifecycleState::Loaded | LifecycleState::Activated => {
                warn!(state = state.as_str(), "Load signal delivered again, components kept");
            }
            LifecycleState::Deactivated => {
                state.ensure_transition(LifecycleState::Loaded)?;
            }
        }

        drop(transition);

        // Released so listeners can drive the plugin
        self.hooks.trigger(&self.loaded_signal, Vec::new()).await;
        Ok(())
    }

    /// Handles the host's activation signal.
    pub async fn activate(&self) -> AppResult<()> {
        let _transition = self.transition.lock().await;
        self.state().await.ensure_transition(LifecycleState::Activated)?;

        self.extension.on_activate(&self.config).await?;
        *self.state.write().await = LifecycleState::Activated;

        info!("Plugin activated");
        Ok(())
    }

    /// Handles the host's deactivation signal.
    pub async fn deactivate(&self) -> AppResult<()> {
        let _transition = self.transition.lock().await;
        self.state().await.ensure_transition(LifecycleState::Deactivated)?;

        self.extension.on_deactivate(&self.config).await?;
        *self.state.write().await = LifecycleState::Deactivated;

        info!("Plugin deactivated");
        Ok(())
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    /// Components built by the last successful load.
    pub async fn components(&self) -> Option<LoadedComponents> {
        self.components.read().await.clone()
    }

    /// Plugin configuration.
    pub fn config(&self) -> &Arc<ConfigContainer> {
        &self.config
    }

    /// Name of the signal emitted after load.
    pub fn loaded_signal(&self) -> &str {
        &self.loaded_signal
    }

    async fn build_components(&self) -> AppResult<LoadedComponents> {
        let services = Arc::new(ServiceContainer::new());
        let events = Arc::new(EventManager::new(self.hooks.clone()));
        let prefix = self.config.get_str(keys::PREFIX).unwrap_or_default();
        let options = Arc::new(Options::new(prefix, self.option_store.clone()));

        services.insert(self.config.clone());
        services.insert(events.clone());
        services.insert(options.clone());

        let context = PluginContext {
            config: self.config.clone(),
            options: options.clone(),
            services: services.clone(),
        };

        let mut subscribers: Vec<Arc<dyn EventSubscriber>> = Vec::new();

        for factory in &self.subscribers {
            let registered = match factory(&context) {
                Ok(subscriber) => {
                    let bound = events.add_subscriber(subscriber.as_ref()).await;
                    bound.map(|_| subscriber)
                }
                Err(e) => Err(e),
            };

            match registered {
                Ok(subscriber) => subscribers.push(subscriber),
                Err(e) => {
                    for subscriber in &subscribers {
                        events.remove_subscriber(subscriber.as_ref()).await;
                    }
                    return Err(e);
                }
            }
        }

        Ok(LoadedComponents {
            services,
            events,
            options,
            subscribers,
        })
    }
}
