//! Synchronous dispatch component
//!
//! The no-queue sibling of [`AsyncQueueComponent`]: `send` delivers inline
//! on the calling thread, so the caller observes listener completion (and
//! aggregated listener failures) directly. Useful where delivery latency
//! matters more than decoupling.
//!
//! [`AsyncQueueComponent`]: crate::queue::component::AsyncQueueComponent

use crate::component::{Component, ComponentError, ComponentResult};
use crate::dispatch::{
    DispatchError, DispatchResult, DispatchSink, Event, Listener, ListenerId, ListenerRegistry,
};
use serde::Deserialize;
use std::any::Any;
use std::sync::Arc;

/// Registry name of the synchronous dispatch component
pub const NAME: &str = "eventq/syncq";

/// Configuration options for the synchronous dispatch component
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncDispatchOptions {
    /// Preserve registration order when listeners are removed
    pub ordered: bool,
}

impl Default for SyncDispatchOptions {
    fn default() -> Self {
        Self { ordered: true }
    }
}

/// Component delivering events inline through a listener registry
pub struct SyncDispatchComponent<E: Event> {
    options: SyncDispatchOptions,
    registry: Option<Arc<ListenerRegistry<E>>>,
}

impl<E: Event> Default for SyncDispatchComponent<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> SyncDispatchComponent<E> {
    pub fn new() -> Self {
        Self {
            options: SyncDispatchOptions::default(),
            registry: None,
        }
    }

    fn registry(&self) -> DispatchResult<&Arc<ListenerRegistry<E>>> {
        self.registry.as_ref().ok_or_else(|| DispatchError::Internal {
            message: "sync dispatch component is not initialized".to_string(),
        })
    }

    /// Deliver an event inline to every listener registered for its key
    pub fn send(&self, event: E) -> DispatchResult<()> {
        self.registry()?.deliver(event)
    }

    /// Register a listener for one event key
    pub fn add_listener(
        &self,
        key: E::Key,
        listener: Box<dyn Listener<E>>,
    ) -> DispatchResult<ListenerId> {
        self.registry()?.add_listener(key, listener)
    }

    /// Remove a listener; returns whether it was registered
    pub fn remove_listener(&self, id: ListenerId) -> DispatchResult<bool> {
        self.registry()?.remove_listener(id)
    }

    /// Check whether a listener is still registered
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.registry
            .as_ref()
            .map(|registry| registry.has_listener(id))
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl<E: Event> Component for SyncDispatchComponent<E> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn configure(&mut self, options: serde_json::Value) -> ComponentResult<()> {
        self.options = serde_json::from_value(options).map_err(|err| {
            ComponentError::UnsupportedConfiguration {
                message: format!("sync dispatch options: {err}"),
            }
        })?;
        Ok(())
    }

    async fn initialize(&mut self) -> ComponentResult<()> {
        if self.registry.is_some() {
            return Err(ComponentError::Internal {
                message: "sync dispatch component initialized twice".to_string(),
            });
        }
        self.registry = Some(Arc::new(ListenerRegistry::new(self.options.ordered)));
        Ok(())
    }

    async fn shutdown(&mut self) -> ComponentResult<()> {
        match self.registry.take() {
            Some(_) => Ok(()),
            None => Err(ComponentError::NotRunning),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
