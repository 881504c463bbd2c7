//! Type-keyed service container.

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;

/// Holds one shared instance per type.
#[derive(Debug, Default)]
pub struct ServiceContainer {
    services: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `service`, replacing any previous instance of the same type.
    pub fn insert<T: Any + Send + Sync>(&self, service: Arc<T>) {
        self.services.insert(TypeId::of::<T>(), service);
    }

    /// Returns the instance stored for `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value().clone().downcast::<T>().ok())
    }

    /// Whether an instance of `T` is stored.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
