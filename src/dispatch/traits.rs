//! Traits for the dispatch layer

use crate::dispatch::error::DispatchResult;
use crate::dispatch::event::Event;

/// Capability consumed by the queue consumer: deliver one event
///
/// Invoked once per popped event, synchronously, with no queue lock held.
/// The queue never retries or requeues on error; a returned error is at most
/// logged by the caller.
pub trait DispatchSink<E: Event>: Send + Sync {
    fn deliver(&self, event: E) -> DispatchResult<()>;
}

/// A listener registered for one event key
pub trait Listener<E: Event>: Send + Sync {
    /// Handle a delivered event
    fn on_event(&self, event: &E) -> DispatchResult<()>;
}

/// Adapter turning a closure into a [`Listener`]
pub struct FnListener<F> {
    handler: F,
}

impl<E, F> Listener<E> for FnListener<F>
where
    E: Event,
    F: Fn(&E) -> DispatchResult<()> + Send + Sync,
{
    fn on_event(&self, event: &E) -> DispatchResult<()> {
        (self.handler)(event)
    }
}

/// Wrap a closure as a listener
///
/// ```no_run
/// # use eventq::dispatch::{listener_fn, Event, ListenerRegistry};
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Kind { Tick }
/// # #[derive(Debug)]
/// # struct Tick(u64);
/// # impl Event for Tick {
/// #     type Key = Kind;
/// #     fn key(&self) -> Kind { Kind::Tick }
/// # }
/// # fn example(registry: &ListenerRegistry<Tick>) {
/// let id = registry
///     .add_listener(Kind::Tick, Box::new(listener_fn(|event: &Tick| {
///         println!("tick {}", event.0);
///         Ok(())
///     })))
///     .unwrap();
/// # }
/// ```
pub fn listener_fn<E, F>(handler: F) -> FnListener<F>
where
    E: Event,
    F: Fn(&E) -> DispatchResult<()> + Send + Sync,
{
    FnListener { handler }
}
