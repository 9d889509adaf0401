//! # Beaker Core
//!
//! The foundational layer: the shared application context and the typed
//! pub/sub event bus components communicate over.

pub mod context;
pub mod event;

pub use context::Context;
pub use event::{Event, EventEmitter};
