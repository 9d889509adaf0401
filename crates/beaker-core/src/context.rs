//! Shared application context

use std::sync::Arc;

use parking_lot::RwLock;
use settings::PreferenceStore;

use crate::EventEmitter;

/// Shared services every component can reach
pub struct Context {
    /// Persisted preferences
    preferences: Arc<RwLock<PreferenceStore>>,
    /// Event bus for pub/sub messaging
    events: Arc<EventEmitter>,
}

impl Context {
    pub fn new(preferences: PreferenceStore) -> Self {
        Self {
            preferences: Arc::new(RwLock::new(preferences)),
            events: Arc::new(EventEmitter::new()),
        }
    }

    pub fn preferences(&self) -> &Arc<RwLock<PreferenceStore>> {
        &self.preferences
    }

    pub fn events(&self) -> &Arc<EventEmitter> {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_shares_preferences() {
        let context = Context::new(PreferenceStore::in_memory());
        context.preferences().write().set("k", 1u32);
        assert_eq!(context.preferences().read().get::<u32>("k"), Some(1));
    }
}
