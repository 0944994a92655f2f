//! QueueRunner - asynchronous delivery pipeline
//!
//! A runner owns a [`RingQueue`] behind a mutex/condvar pair and a
//! dedicated consumer that pops events and forwards them to the injected
//! [`DispatchSink`]. Producers enqueue from any thread or task; the call is
//! lock-bounded and never waits for the consumer. Shutdown is two-phase:
//! signal the consumer, then block until it has drained every accepted
//! event and exited.

use crate::core::sync::handle_mutex_poison;
use crate::dispatch::{DispatchSink, Event};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::ring::RingQueue;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use strum_macros::Display;

/// Initial ring capacity; the ring doubles on demand from here
const INITIAL_CAPACITY: usize = 128;

/// Default bound on queued events
pub const DEFAULT_MAX_SIZE: i64 = 1 << 20;

/// Peak warnings are sampled: emitted only when the size crosses a
/// 2^15-aligned boundary, so sustained load cannot flood the log.
const PEAK_WARNING_MASK: usize = (1 << 15) - 1;

/// Lifecycle status of a runner
///
/// Transitions are monotonic and one-directional:
/// `Running -> Stopping -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[repr(u8)]
pub enum RunnerStatus {
    Running = 0,
    Stopping = 1,
    Closed = 2,
}

impl RunnerStatus {
    fn from_u8(raw: u8) -> RunnerStatus {
        match raw {
            0 => RunnerStatus::Running,
            1 => RunnerStatus::Stopping,
            _ => RunnerStatus::Closed,
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Maximum number of queued events; zero or negative means unbounded
    pub max_size: i64,
    /// Run the consumer on its own dedicated OS thread instead of the
    /// async runtime's blocking pool. Relevant only when the sink has
    /// thread-affinity requirements.
    pub lock_thread: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            lock_thread: false,
        }
    }
}

/// Queue contents plus the telemetry that must stay consistent with them
struct QueueState<E> {
    ring: RingQueue<E>,
    peak_size: usize,
}

struct Shared<E: Event> {
    state: Mutex<QueueState<E>>,
    cond: Condvar,
    status: AtomicU8,
    quit: AtomicBool,
    /// Normalized bound; 0 means unbounded
    max_size: usize,
}

enum ConsumerHandle {
    Dedicated(std::thread::JoinHandle<()>),
    Pooled(tokio::task::JoinHandle<()>),
}

/// Thread-safe single-consumer event pipeline
pub struct QueueRunner<E: Event> {
    shared: Arc<Shared<E>>,
    consumer: Mutex<Option<ConsumerHandle>>,
}

impl<E: Event> QueueRunner<E> {
    /// Create the runner and start its consumer
    ///
    /// The consumer runs until [`shutdown`](Self::shutdown) completes. With
    /// `lock_thread` unset this must be called from within a tokio runtime.
    pub fn start(config: RunnerConfig, sink: Arc<dyn DispatchSink<E>>) -> QueueResult<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                ring: RingQueue::new(INITIAL_CAPACITY),
                peak_size: 0,
            }),
            cond: Condvar::new(),
            status: AtomicU8::new(RunnerStatus::Running as u8),
            quit: AtomicBool::new(false),
            max_size: if config.max_size > 0 {
                config.max_size as usize
            } else {
                0
            },
        });

        log::info!("queue consumer starting, lock_thread: {}", config.lock_thread);
        let consumer = if config.lock_thread {
            let shared = Arc::clone(&shared);
            let handle = std::thread::Builder::new()
                .name("eventq-consumer".to_string())
                .spawn(move || consume(shared, sink))
                .map_err(|err| QueueError::Internal {
                    message: format!("failed to spawn consumer thread: {err}"),
                })?;
            ConsumerHandle::Dedicated(handle)
        } else {
            let shared = Arc::clone(&shared);
            ConsumerHandle::Pooled(tokio::task::spawn_blocking(move || consume(shared, sink)))
        };

        Ok(Self {
            shared,
            consumer: Mutex::new(Some(consumer)),
        })
    }

    /// Current lifecycle status
    pub fn status(&self) -> RunnerStatus {
        RunnerStatus::from_u8(self.shared.status.load(Ordering::Acquire))
    }

    /// Current number of queued events
    pub fn size(&self) -> QueueResult<usize> {
        Ok(self.lock_state()?.ring.size())
    }

    /// High-water mark of the queue size (see `update_peak` for the decay
    /// policy)
    pub fn peak_size(&self) -> QueueResult<usize> {
        Ok(self.lock_state()?.peak_size)
    }

    /// Submit an event for asynchronous delivery
    ///
    /// Fails with [`QueueError::NotRunning`] outside the `Running` window
    /// and with [`QueueError::QueueFull`] when a configured bound is
    /// reached; in the latter case the event is dropped and the overload is
    /// logged so operators can tell deliberate shedding from misbehaving
    /// producers. Never blocks waiting for the consumer.
    pub fn enqueue(&self, event: E) -> QueueResult<()> {
        if self.status() != RunnerStatus::Running {
            return Err(QueueError::NotRunning);
        }

        let max_size = self.shared.max_size;
        let mut state = self.lock_state()?;
        if max_size > 0 && state.ring.size() >= max_size {
            drop(state);
            log::warn!(
                "event discarded because the queue is full, max_size: {}, event: {:?}",
                max_size,
                event
            );
            return Err(QueueError::QueueFull { max_size });
        }

        let size = state.ring.push(event);
        let previous_peak = update_peak(&mut state.peak_size, size);
        drop(state);

        if size == 1 {
            // Queue went empty -> non-empty; the consumer may be parked
            self.shared.cond.notify_one();
        } else if size & PEAK_WARNING_MASK == 0 && size > previous_peak {
            log::warn!("queue size reached new peak: {}", size);
        }
        Ok(())
    }

    /// Two-phase stop: signal the consumer, then block until it has
    /// drained the queue and exited
    ///
    /// Every event accepted before the shutdown signal is dispatched
    /// exactly once before this returns. A second call fails with
    /// [`QueueError::NotRunning`].
    pub async fn shutdown(&self) -> QueueResult<()> {
        if self
            .shared
            .status
            .compare_exchange(
                RunnerStatus::Running as u8,
                RunnerStatus::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            log::error!("queue component not running");
            return Err(QueueError::NotRunning);
        }

        {
            // The flag is flipped under the lock so the consumer cannot
            // re-park between its quit check and the condvar wait
            let _state = self.lock_state()?;
            self.shared.quit.store(true, Ordering::Release);
            self.shared.cond.notify_one();
        }
        log::info!("queue waiting for consumer shutdown");

        let handle = {
            let mut consumer = handle_mutex_poison(self.consumer.lock(), |message| {
                QueueError::Internal { message }
            })?;
            consumer.take()
        };

        match handle {
            Some(ConsumerHandle::Pooled(handle)) => {
                handle.await.map_err(|err| QueueError::Internal {
                    message: format!("consumer task failed: {err}"),
                })?;
            }
            Some(ConsumerHandle::Dedicated(handle)) => {
                tokio::task::spawn_blocking(move || handle.join())
                    .await
                    .map_err(|err| QueueError::Internal {
                        message: format!("consumer join task failed: {err}"),
                    })?
                    .map_err(|_| QueueError::Internal {
                        message: "consumer thread panicked".to_string(),
                    })?;
            }
            None => {}
        }

        self.shared
            .status
            .store(RunnerStatus::Closed as u8, Ordering::Release);
        log::info!("queue shutdown complete");
        Ok(())
    }

    fn lock_state(&self) -> QueueResult<MutexGuard<'_, QueueState<E>>> {
        handle_mutex_poison(self.shared.state.lock(), |message| QueueError::Internal {
            message,
        })
    }
}

impl<E: Event> Drop for QueueRunner<E> {
    fn drop(&mut self) {
        // A runner dropped without shutdown still releases its consumer;
        // the consumer drains and exits on its own, nobody waits for it
        if self.status() == RunnerStatus::Running {
            let guard = self.shared.state.lock();
            self.shared.quit.store(true, Ordering::Release);
            self.shared.cond.notify_one();
            drop(guard);
        }
    }
}

/// Update the stored peak, returning the previous value
///
/// Hysteresis: the peak moves up whenever the new size exceeds it, but
/// decays only after the size has fallen strictly below half of it. New
/// highs surface immediately while a sustained drain eventually resets the
/// mark without it churning on every enqueue.
fn update_peak(peak: &mut usize, size: usize) -> usize {
    let previous = *peak;
    if size > previous || size << 1 < previous {
        *peak = size;
    }
    previous
}

/// Consumer loop; runs until the quit signal is observed at an
/// empty-queue boundary
fn consume<E: Event>(shared: Arc<Shared<E>>, sink: Arc<dyn DispatchSink<E>>) {
    log::info!("queue consumer running");
    loop {
        let mut state = lock_recover(&shared);
        loop {
            if state.ring.size() > 0 {
                break;
            }
            if shared.quit.load(Ordering::Acquire) {
                drop(state);
                finish(&shared, sink.as_ref());
                return;
            }
            // Predicate re-check loop guards against spurious wakeups
            state = shared
                .cond
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        let event = state.ring.pop();
        let remaining = state.ring.size();
        drop(state);

        if let Some(event) = event {
            deliver(sink.as_ref(), event);
            if remaining > 0 {
                // Drain the burst before looking at the quit signal
                continue;
            }
        }

        if shared.quit.load(Ordering::Acquire) {
            finish(&shared, sink.as_ref());
            return;
        }
    }
}

/// Drain phase: dispatch whatever is still queued, then exit
fn finish<E: Event>(shared: &Shared<E>, sink: &dyn DispatchSink<E>) {
    log::info!("queue consumer quitting");
    loop {
        let mut state = lock_recover(shared);
        if state.ring.size() == 0 {
            break;
        }
        let event = state.ring.pop();
        drop(state);
        if let Some(event) = event {
            deliver(sink, event);
        }
    }
    log::info!("queue consumer cleanup complete");
}

fn deliver<E: Event>(sink: &dyn DispatchSink<E>, event: E) {
    let key = event.key();
    if let Err(err) = sink.deliver(event) {
        // Dispatch is fire-and-forget from the producer's perspective; a
        // misbehaving listener must not wedge the pipeline
        log::debug!("dispatch failed for event key {:?}: {}", key, err);
    }
}

/// The consumer must keep draining even if a producer poisoned the lock,
/// so it recovers the guard instead of propagating
fn lock_recover<E: Event>(shared: &Shared<E>) -> MutexGuard<'_, QueueState<E>> {
    shared
        .state
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
