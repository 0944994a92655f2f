//! Event trait for keyed routing

use std::fmt::Debug;
use std::hash::Hash;

/// An event that can be moved through a queue and routed to listeners
///
/// The payload is opaque to the queue and the registry; routing only uses
/// the key. Keys are expected to come from a closed enumeration (or another
/// cheap, stable tag type) owned by the host application:
///
/// ```
/// use eventq::dispatch::Event;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind {
///     Tick,
///     Note,
/// }
///
/// #[derive(Debug, Clone)]
/// enum AppEvent {
///     Tick(u64),
///     Note(String),
/// }
///
/// impl Event for AppEvent {
///     type Key = Kind;
///
///     fn key(&self) -> Kind {
///         match self {
///             AppEvent::Tick(_) => Kind::Tick,
///             AppEvent::Note(_) => Kind::Note,
///         }
///     }
/// }
/// ```
pub trait Event: Send + Debug + 'static {
    /// Stable routing key shared by all events of one kind
    type Key: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// The routing key for this particular event
    fn key(&self) -> Self::Key;
}
