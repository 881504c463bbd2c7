//! Host hook system — registry, dispatcher, and payload definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{
    DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookHandler, HookPayload, MAX_ACCEPTED_ARGS,
};
pub use dispatcher::{DispatchResult, HandlerFailure, HookDispatcher};
pub use registry::{HookRegistry, RegisteredHandler};
