//! Shared fixtures for the queue test suites

use crate::dispatch::{DispatchResult, DispatchSink, Event};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Kind {
    Tick,
    Note,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TestEvent {
    Tick(u64),
    Note(&'static str),
}

impl Event for TestEvent {
    type Key = Kind;

    fn key(&self) -> Kind {
        match self {
            TestEvent::Tick(_) => Kind::Tick,
            TestEvent::Note(_) => Kind::Note,
        }
    }
}

/// Sink recording every delivered event, with support for waiting until a
/// delivery count is reached
pub(crate) struct CollectSink {
    events: Mutex<Vec<TestEvent>>,
    cond: Condvar,
}

impl CollectSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            cond: Condvar::new(),
        })
    }

    pub(crate) fn delivered(&self) -> Vec<TestEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Block until at least `count` events were delivered; false on timeout
    pub(crate) fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let guard = self.events.lock().unwrap();
        let (_guard, result) = self
            .cond
            .wait_timeout_while(guard, timeout, |events| events.len() < count)
            .unwrap();
        !result.timed_out()
    }
}

impl DispatchSink<TestEvent> for CollectSink {
    fn deliver(&self, event: TestEvent) -> DispatchResult<()> {
        self.events.lock().unwrap().push(event);
        self.cond.notify_all();
        Ok(())
    }
}

/// Sink holding deliveries behind a gate, so tests can pin the consumer
/// mid-dispatch and build up queue contents deterministically
pub(crate) struct GateSink {
    inner: Arc<CollectSink>,
    open: Mutex<bool>,
    opened: Condvar,
    entered: Mutex<usize>,
    entered_cond: Condvar,
}

impl GateSink {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: CollectSink::new(),
            open: Mutex::new(false),
            opened: Condvar::new(),
            entered: Mutex::new(0),
            entered_cond: Condvar::new(),
        })
    }

    pub(crate) fn collector(&self) -> Arc<CollectSink> {
        Arc::clone(&self.inner)
    }

    /// Release all pending and future deliveries
    pub(crate) fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.opened.notify_all();
    }

    /// Block until `count` deliveries have reached the gate
    pub(crate) fn wait_entered(&self, count: usize, timeout: Duration) -> bool {
        let guard = self.entered.lock().unwrap();
        let (_guard, result) = self
            .entered_cond
            .wait_timeout_while(guard, timeout, |entered| *entered < count)
            .unwrap();
        !result.timed_out()
    }
}

impl DispatchSink<TestEvent> for GateSink {
    fn deliver(&self, event: TestEvent) -> DispatchResult<()> {
        {
            let mut entered = self.entered.lock().unwrap();
            *entered += 1;
            self.entered_cond.notify_all();
        }
        let guard = self.open.lock().unwrap();
        let _guard = self.opened.wait_while(guard, |open| !*open).unwrap();
        self.inner.deliver(event)
    }
}
