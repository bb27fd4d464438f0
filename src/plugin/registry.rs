//! Host plugin registry capability.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::PluginDescriptor;

/// Key-value store a host uses to discover visuals.
///
/// Owned by the host; the shim only checks for and writes its own key.
pub trait PluginRegistry: Send + Sync {
    fn has(&self, key: &str) -> bool;
    /// Insert or replace the entry under `key`.
    fn set(&self, key: &str, descriptor: PluginDescriptor);
}

/// In-process registry for standalone hosts and tests.
#[derive(Default)]
pub struct InMemoryRegistry {
    plugins: Mutex<HashMap<String, Arc<PluginDescriptor>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<PluginDescriptor>> {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.plugins.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PluginRegistry for InMemoryRegistry {
    fn has(&self, key: &str) -> bool {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn set(&self, key: &str, descriptor: PluginDescriptor) {
        self.plugins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), Arc::new(descriptor));
    }
}
