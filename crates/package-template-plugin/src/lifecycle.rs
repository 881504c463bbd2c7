//! Plugin lifecycle states and extension points.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use package_template_core::{AppError, AppResult, ConfigContainer};

/// Where the plugin is in its host-driven lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Constructed, the host has not signalled load yet.
    Unloaded,
    /// Collaborators built and subscribers registered.
    Loaded,
    /// The host activated the plugin.
    Activated,
    /// The host deactivated the plugin.
    Deactivated,
}

impl LifecycleState {
    /// Returns the string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loaded => "loaded",
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: LifecycleState) -> bool {
        matches!(
            (self, next),
            (Self::Unloaded, Self::Loaded)
                | (Self::Loaded, Self::Activated)
                | (Self::Deactivated, Self::Activated)
                | (Self::Loaded, Self::Deactivated)
                | (Self::Activated, Self::Deactivated)
        )
    }

    /// Returns a lifecycle error unless `self → next` is allowed.
    pub fn ensure_transition(&self, next: LifecycleState) -> AppResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::lifecycle(format!(
                "Cannot move plugin from '{self}' to '{next}'"
            )))
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Work to run when the host activates or deactivates the plugin.
///
/// Both methods default to doing nothing.
#[async_trait]
pub trait LifecycleExtension: Send + Sync + std::fmt::Debug {
    /// Called on activation, before the state changes.
    async fn on_activate(&self, _config: &ConfigContainer) -> AppResult<()> {
        Ok(())
    }

    /// Called on deactivation, before the state changes.
    async fn on_deactivate(&self, _config: &ConfigContainer) -> AppResult<()> {
        Ok(())
    }
}

/// Extension with no activation or deactivation work.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExtension;

impl LifecycleExtension for NoopExtension {}
