//! Public API for the dispatch layer
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::dispatch::error::{DispatchError, DispatchResult};
pub use crate::dispatch::event::Event;
pub use crate::dispatch::registry::{ListenerId, ListenerRegistry};
pub use crate::dispatch::traits::{listener_fn, DispatchSink, FnListener, Listener};
