//! Type-keyed listener registry
//!
//! Routes a delivered event to every listener registered under the event's
//! key. Listener sets are per-key vectors, so delivery order within a key is
//! registration order.

use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::event::Event;
use crate::dispatch::traits::{DispatchSink, Listener};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Handle returned by `add_listener`, used to remove the listener later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ListenerEntry<E: Event> {
    id: ListenerId,
    listener: Box<dyn Listener<E>>,
}

struct RegistryState<E: Event> {
    by_key: HashMap<E::Key, Vec<ListenerEntry<E>>>,
    key_of: HashMap<ListenerId, E::Key>,
}

/// Listener registry implementing [`DispatchSink`]
///
/// `ordered` controls removal semantics: when true (the default), removing a
/// listener preserves the registration order of the remaining listeners for
/// that key; when false, removal may reorder them (swap removal).
pub struct ListenerRegistry<E: Event> {
    next_listener_id: AtomicU64,
    state: RwLock<RegistryState<E>>,
    ordered: bool,
}

impl<E: Event> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<E: Event> ListenerRegistry<E> {
    pub fn new(ordered: bool) -> Self {
        Self {
            next_listener_id: AtomicU64::new(1),
            state: RwLock::new(RegistryState {
                by_key: HashMap::new(),
                key_of: HashMap::new(),
            }),
            ordered,
        }
    }

    /// Register a listener for one event key
    pub fn add_listener(
        &self,
        key: E::Key,
        listener: Box<dyn Listener<E>>,
    ) -> DispatchResult<ListenerId> {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::SeqCst));

        let mut state = handle_rwlock_write(self.state.write(), |message| {
            DispatchError::Internal { message }
        })?;
        state
            .by_key
            .entry(key)
            .or_default()
            .push(ListenerEntry { id, listener });
        state.key_of.insert(id, key);

        Ok(id)
    }

    /// Remove a listener; returns whether it was registered
    pub fn remove_listener(&self, id: ListenerId) -> DispatchResult<bool> {
        let mut state = handle_rwlock_write(self.state.write(), |message| {
            DispatchError::Internal { message }
        })?;

        let Some(key) = state.key_of.remove(&id) else {
            return Ok(false);
        };

        if let Some(entries) = state.by_key.get_mut(&key) {
            if let Some(index) = entries.iter().position(|entry| entry.id == id) {
                if self.ordered {
                    entries.remove(index);
                } else {
                    entries.swap_remove(index);
                }
            }
            if entries.is_empty() {
                state.by_key.remove(&key);
            }
        }

        Ok(true)
    }

    /// Check whether a listener is still registered
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.state
            .read()
            .map(|state| state.key_of.contains_key(&id))
            .unwrap_or(false)
    }

    /// Total number of registered listeners across all keys
    pub fn listener_count(&self) -> usize {
        self.state.read().map(|state| state.key_of.len()).unwrap_or(0)
    }
}

impl<E: Event> DispatchSink<E> for ListenerRegistry<E> {
    fn deliver(&self, event: E) -> DispatchResult<()> {
        let state = handle_rwlock_read(self.state.read(), |message| {
            DispatchError::Internal { message }
        })?;

        let Some(entries) = state.by_key.get(&event.key()) else {
            log::trace!("no listeners registered for event key {:?}", event.key());
            return Ok(());
        };

        let total = entries.len();
        let mut failed = 0;
        for entry in entries {
            if let Err(err) = entry.listener.on_event(&event) {
                failed += 1;
                log::debug!(
                    "listener {:?} failed for event key {:?}: {}",
                    entry.id,
                    event.key(),
                    err
                );
            }
        }

        if failed > 0 {
            return Err(DispatchError::DeliveryFailed {
                key: format!("{:?}", event.key()),
                failed,
                total,
            });
        }
        Ok(())
    }
}
