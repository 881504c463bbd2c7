//! Closure adapter for quick handler creation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use package_template_core::AppResult;

use crate::hooks::definitions::{HookHandler, HookPayload};

type BoxedFuture = Pin<Box<dyn Future<Output = AppResult<()>> + Send>>;

type BoxedHandlerFn = dyn Fn(&HookPayload) -> BoxedFuture + Send + Sync;

/// A closure-based hook handler.
pub struct ClosureHandler {
    /// Owning component.
    owner: String,
    /// Handler function.
    handler: Arc<BoxedHandlerFn>,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("owner", &self.owner)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler owned by `owner`.
    pub fn new<F, Fut>(owner: &str, handler: F) -> Self
    where
        F: Fn(&HookPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        let handler: Arc<BoxedHandlerFn> = Arc::new(move |payload: &HookPayload| -> BoxedFuture {
            Box::pin(handler(payload))
        });

        Self {
            owner: owner.to_string(),
            handler,
        }
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    async fn handle(&self, payload: &HookPayload) -> AppResult<()> {
        (self.handler)(payload).await
    }

    fn owner(&self) -> &str {
        &self.owner
    }
}
