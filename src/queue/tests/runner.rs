//! Tests for runner ordering, shutdown and telemetry

use crate::dispatch::{DispatchResult, DispatchSink};
use crate::queue::runner::{QueueRunner, RunnerConfig, RunnerStatus};
use crate::queue::tests::support::{CollectSink, GateSink, TestEvent};
use crate::queue::QueueError;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_fifo_delivery_preserves_enqueue_order() {
    let sink = CollectSink::new();
    let runner = QueueRunner::start(RunnerConfig::default(), Arc::clone(&sink) as _).unwrap();

    for i in 0..200 {
        runner.enqueue(TestEvent::Tick(i)).unwrap();
    }

    assert!(sink.wait_for(200, WAIT), "timed out waiting for delivery");
    let expected: Vec<TestEvent> = (0..200).map(TestEvent::Tick).collect();
    assert_eq!(sink.delivered(), expected);

    runner.shutdown().await.unwrap();
    assert_eq!(runner.status(), RunnerStatus::Closed);
}

#[tokio::test]
async fn test_shutdown_drains_every_accepted_event() {
    let gate = GateSink::new();
    let collector = gate.collector();
    let runner = Arc::new(
        QueueRunner::start(RunnerConfig::default(), Arc::clone(&gate) as _).unwrap(),
    );

    // Pin the consumer inside the first delivery, then stack up the rest
    runner.enqueue(TestEvent::Tick(0)).unwrap();
    assert!(gate.wait_entered(1, WAIT));
    for i in 1..50 {
        runner.enqueue(TestEvent::Tick(i)).unwrap();
    }
    assert_eq!(runner.size().unwrap(), 49);

    let shutdown = {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move { runner.shutdown().await })
    };

    gate.open();
    shutdown.await.unwrap().unwrap();

    // Everything accepted before the signal was dispatched, in order
    let expected: Vec<TestEvent> = (0..50).map(TestEvent::Tick).collect();
    assert_eq!(collector.delivered(), expected);
    assert_eq!(runner.status(), RunnerStatus::Closed);
}

#[tokio::test]
async fn test_shutdown_with_empty_queue_completes() {
    let sink = CollectSink::new();
    let runner = QueueRunner::start(RunnerConfig::default(), Arc::clone(&sink) as _).unwrap();

    runner.shutdown().await.unwrap();
    assert_eq!(runner.status(), RunnerStatus::Closed);
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_enqueue_after_shutdown_fails() {
    let sink = CollectSink::new();
    let runner = QueueRunner::start(RunnerConfig::default(), Arc::clone(&sink) as _).unwrap();

    runner.shutdown().await.unwrap();

    match runner.enqueue(TestEvent::Tick(1)) {
        Err(QueueError::NotRunning) => {}
        other => panic!("expected NotRunning, got {:?}", other),
    }
}

#[tokio::test]
async fn test_second_shutdown_fails() {
    let sink = CollectSink::new();
    let runner = QueueRunner::start(RunnerConfig::default(), Arc::clone(&sink) as _).unwrap();

    runner.shutdown().await.unwrap();

    match runner.shutdown().await {
        Err(QueueError::NotRunning) => {}
        other => panic!("expected NotRunning, got {:?}", other),
    }
}

#[tokio::test]
async fn test_peak_size_tracks_high_water_mark() {
    let gate = GateSink::new();
    let runner = QueueRunner::start(RunnerConfig::default(), Arc::clone(&gate) as _).unwrap();

    // First event is popped and held at the gate; the next three stack up
    runner.enqueue(TestEvent::Tick(0)).unwrap();
    assert!(gate.wait_entered(1, WAIT));
    for i in 1..=3 {
        runner.enqueue(TestEvent::Tick(i)).unwrap();
    }

    assert_eq!(runner.size().unwrap(), 3);
    assert_eq!(runner.peak_size().unwrap(), 3);

    gate.open();
    runner.shutdown().await.unwrap();
    assert_eq!(gate.collector().delivered().len(), 4);
}

#[tokio::test]
async fn test_dedicated_thread_consumer_delivers() {
    let sink = CollectSink::new();
    let config = RunnerConfig {
        lock_thread: true,
        ..RunnerConfig::default()
    };
    let runner = QueueRunner::start(config, Arc::clone(&sink) as _).unwrap();

    for i in 0..10 {
        runner.enqueue(TestEvent::Tick(i)).unwrap();
    }

    assert!(sink.wait_for(10, WAIT));
    runner.shutdown().await.unwrap();
    assert_eq!(sink.delivered().len(), 10);
}

/// Sink that records everything but fails delivery of every Note
struct FlakySink {
    inner: Arc<CollectSink>,
}

impl DispatchSink<TestEvent> for FlakySink {
    fn deliver(&self, event: TestEvent) -> DispatchResult<()> {
        let is_note = matches!(event, TestEvent::Note(_));
        self.inner.deliver(event)?;
        if is_note {
            return Err(crate::dispatch::DispatchError::ListenerFailed {
                message: "note rejected".to_string(),
            });
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_sink_errors_do_not_stop_the_consumer() {
    let collector = CollectSink::new();
    let sink = Arc::new(FlakySink {
        inner: Arc::clone(&collector),
    });
    let runner = QueueRunner::start(RunnerConfig::default(), sink as _).unwrap();

    runner.enqueue(TestEvent::Note("first")).unwrap();
    runner.enqueue(TestEvent::Tick(1)).unwrap();
    runner.enqueue(TestEvent::Note("second")).unwrap();
    runner.enqueue(TestEvent::Tick(2)).unwrap();

    assert!(collector.wait_for(4, WAIT));
    runner.shutdown().await.unwrap();
    assert_eq!(collector.delivered().len(), 4);
}
