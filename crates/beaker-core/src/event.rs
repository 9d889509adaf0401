//! Event system for cross-component communication

use std::any::{Any, TypeId};
use std::collections::HashMap;

use parking_lot::RwLock;

/// Base trait for all events
pub trait Event: Any + Send + Sync {
    /// Event name for logging
    fn name(&self) -> &'static str;
}

/// Type-erased event handler
type BoxedHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Typed pub/sub event bus
pub struct EventEmitter {
    handlers: RwLock<HashMap<TypeId, Vec<BoxedHandler>>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to an event type
    pub fn on<E: Event + 'static, F>(&self, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let boxed: BoxedHandler = Box::new(move |any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        self.handlers
            .write()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(boxed);
    }

    /// Emit an event to all subscribers
    pub fn emit<E: Event + 'static>(&self, event: E) {
        if let Some(handlers) = self.handlers.read().get(&TypeId::of::<E>()) {
            for handler in handlers {
                handler(&event);
            }
        }
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

// Core events

/// Editor events
pub mod editor {
    use super::Event;

    /// The document text changed
    pub struct BufferChanged {
        pub text: String,
    }

    impl Event for BufferChanged {
        fn name(&self) -> &'static str {
            "editor.buffer_changed"
        }
    }
}

/// Appearance events
pub mod appearance {
    use super::Event;

    /// The theme flag flipped
    pub struct ThemeChanged {
        pub dark: bool,
    }

    impl Event for ThemeChanged {
        fn name(&self) -> &'static str {
            "appearance.theme_changed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_subscriber() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        emitter.on::<editor::BufferChanged, _>(move |event| {
            assert_eq!(event.text, "x = 1");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit(editor::BufferChanged {
            text: "x = 1".into(),
        });
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unrelated_event_type_is_ignored() {
        let emitter = EventEmitter::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        emitter.on::<appearance::ThemeChanged, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit(editor::BufferChanged { text: String::new() });
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }
}
