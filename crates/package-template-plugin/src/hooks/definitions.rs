//! Hook payload and handler definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use package_template_core::AppResult;

/// Priority handlers get when none is given. Lower runs first.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Number of hook arguments a handler receives when none is given.
pub const DEFAULT_ACCEPTED_ARGS: usize = 1;

/// Upper bound on the accepted argument count of a single handler.
pub const MAX_ACCEPTED_ARGS: usize = 32;

/// Payload passed to hook handlers — the fired hook and its positional arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPayload {
    /// Name of the hook being fired.
    pub hook: String,
    /// Positional arguments, in the order the host passed them.
    pub args: Vec<Value>,
    /// Timestamp of the firing.
    pub timestamp: DateTime<Utc>,
}

impl HookPayload {
    /// Creates a payload with no arguments.
    pub fn new(hook: &str) -> Self {
        Self {
            hook: hook.to_string(),
            args: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Replaces the argument list.
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Appends one argument.
    pub fn with_arg(mut self, value: Value) -> Self {
        self.args.push(value);
        self
    }

    /// Gets an argument by position.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Gets a string argument by position.
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.arg(index).and_then(|v| v.as_str())
    }

    /// Gets an i64 argument by position.
    pub fn get_i64(&self, index: usize) -> Option<i64> {
        self.arg(index).and_then(|v| v.as_i64())
    }

    /// Returns a copy carrying only the first `accepted_args` arguments.
    pub fn truncated(&self, accepted_args: usize) -> Self {
        Self {
            hook: self.hook.clone(),
            args: self.args.iter().take(accepted_args).cloned().collect(),
            timestamp: self.timestamp,
        }
    }
}

/// Trait for hook handler implementations.
#[async_trait::async_trait]
pub trait HookHandler: Send + Sync + std::fmt::Debug {
    /// Handles a hook invocation.
    async fn handle(&self, payload: &HookPayload) -> AppResult<()>;

    /// Returns the component owning this handler.
    fn owner(&self) -> &str;
}
