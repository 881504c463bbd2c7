//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use crate::hooks::definitions::{
    DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookHandler, HookPayload,
};
pub use crate::lifecycle::{LifecycleExtension, LifecycleState};
pub use crate::plugin::{Plugin, PluginContext};
pub use crate::subscriber::{EventSubscriber, HandlerSpec, Subscription};
pub use crate::traits::ClosureHandler;
