//! Asynchronous queue component
//!
//! The lifecycle adapter around a [`QueueRunner`] and the listener registry
//! it delivers into. Producers call [`send`](AsyncQueueComponent::send) (or
//! hold a cloned [`QueueSender`]); listeners register against the owned
//! registry; the hosting framework drives initialize/start/shutdown.

use crate::component::{Component, ComponentError, ComponentResult};
use crate::dispatch::{DispatchResult, DispatchSink, Event, Listener, ListenerId, ListenerRegistry};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::runner::{QueueRunner, RunnerConfig, DEFAULT_MAX_SIZE};
use serde::Deserialize;
use std::any::Any;
use std::sync::Arc;

/// Registry name of the asynchronous queue component
pub const NAME: &str = "eventq/asyncq";

/// Configuration options for the asynchronous queue component
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsyncQueueOptions {
    /// Maximum number of queued events; zero or negative means unbounded.
    /// Events submitted beyond this limit are discarded.
    pub max_size: i64,

    /// Bind the consumer to a dedicated OS thread for sinks with
    /// thread-affinity requirements
    pub lock_thread: bool,
}

impl Default for AsyncQueueOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            lock_thread: false,
        }
    }
}

/// Cloneable producer handle, independent of the component's lifetime
/// borrowing rules
pub struct QueueSender<E: Event> {
    runner: Arc<QueueRunner<E>>,
}

impl<E: Event> Clone for QueueSender<E> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<E: Event> QueueSender<E> {
    /// Submit an event for asynchronous delivery
    pub fn send(&self, event: E) -> QueueResult<()> {
        self.runner.enqueue(event)
    }
}

/// Component wiring a queue runner to a listener registry
pub struct AsyncQueueComponent<E: Event> {
    options: AsyncQueueOptions,
    registry: Arc<ListenerRegistry<E>>,
    runner: Option<Arc<QueueRunner<E>>>,
}

impl<E: Event> Default for AsyncQueueComponent<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> AsyncQueueComponent<E> {
    pub fn new() -> Self {
        Self {
            options: AsyncQueueOptions::default(),
            registry: Arc::new(ListenerRegistry::new(true)),
            runner: None,
        }
    }

    /// Submit an event for asynchronous delivery
    ///
    /// Callable from any number of threads or tasks between a successful
    /// `initialize` and the completion of `shutdown`.
    pub fn send(&self, event: E) -> QueueResult<()> {
        match &self.runner {
            Some(runner) => runner.enqueue(event),
            None => Err(QueueError::NotRunning),
        }
    }

    /// Obtain a cloneable producer handle
    pub fn sender(&self) -> QueueResult<QueueSender<E>> {
        match &self.runner {
            Some(runner) => Ok(QueueSender {
                runner: Arc::clone(runner),
            }),
            None => Err(QueueError::NotRunning),
        }
    }

    /// Register a listener for one event key
    pub fn add_listener(
        &self,
        key: E::Key,
        listener: Box<dyn Listener<E>>,
    ) -> DispatchResult<ListenerId> {
        self.registry.add_listener(key, listener)
    }

    /// Remove a listener; returns whether it was registered
    pub fn remove_listener(&self, id: ListenerId) -> DispatchResult<bool> {
        self.registry.remove_listener(id)
    }

    /// Check whether a listener is still registered
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.registry.has_listener(id)
    }

    /// Current number of queued events
    pub fn queue_size(&self) -> QueueResult<usize> {
        match &self.runner {
            Some(runner) => runner.size(),
            None => Err(QueueError::NotRunning),
        }
    }

    /// High-water mark of the queue size
    pub fn peak_size(&self) -> QueueResult<usize> {
        match &self.runner {
            Some(runner) => runner.peak_size(),
            None => Err(QueueError::NotRunning),
        }
    }
}

#[async_trait::async_trait]
impl<E: Event> Component for AsyncQueueComponent<E> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn configure(&mut self, options: serde_json::Value) -> ComponentResult<()> {
        self.options = serde_json::from_value(options).map_err(|err| {
            ComponentError::UnsupportedConfiguration {
                message: format!("async queue options: {err}"),
            }
        })?;
        Ok(())
    }

    async fn initialize(&mut self) -> ComponentResult<()> {
        if self.runner.is_some() {
            return Err(ComponentError::Internal {
                message: "async queue component initialized twice".to_string(),
            });
        }

        let config = RunnerConfig {
            max_size: self.options.max_size,
            lock_thread: self.options.lock_thread,
        };
        let sink: Arc<dyn DispatchSink<E>> = Arc::clone(&self.registry) as _;
        self.runner = Some(Arc::new(QueueRunner::start(config, sink)?));
        Ok(())
    }

    async fn shutdown(&mut self) -> ComponentResult<()> {
        match &self.runner {
            Some(runner) => runner.shutdown().await.map_err(|err| match err {
                QueueError::NotRunning => ComponentError::NotRunning,
                other => ComponentError::Queue(other),
            }),
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
