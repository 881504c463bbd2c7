//! # package-template-plugin
//!
//! Plugin framework for the package template. Provides:
//!
//! - The host hook API: priority-ordered registry and synchronous dispatcher
//! - The event subscriber capability and the event manager binding it
//! - Prefix-scoped option access and a type-keyed service container
//! - The lifecycle controller (load, activate, deactivate)

pub mod container;
pub mod events;
pub mod hooks;
pub mod lifecycle;
pub mod options;
pub mod plugin;
pub mod prelude;
pub mod subscriber;
pub mod traits;

pub use events::EventManager;
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::HookRegistry;
pub use lifecycle::LifecycleState;
pub use plugin::Plugin;
