//! Asynchronous Event Queue Component
//!
//! A bounded, auto-growing, single-consumer queue that decouples event
//! producers from a dedicated consumer delivering to a listener registry.
//!
//! # Overview
//!
//! - **Many producers, one consumer**: any number of threads or tasks may
//!   send concurrently; one consumer drains in FIFO order
//! - **Bounded memory**: a configurable `max_size` sheds load with an
//!   explicit error instead of buffering without limit
//! - **Predictable growth**: the ring buffer doubles (power-of-two
//!   capacities only), keeping steady-state operation allocation-free
//! - **Drain on shutdown**: every accepted event is delivered exactly once
//!   before shutdown completes
//! - **Overload visibility**: queue-full drops and sampled peak-size highs
//!   are logged at warning level
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  ┌────────────┐  ┌────────────┐
//! │ Producer A │  │ Producer B │  │ Producer C │
//! └─────┬──────┘  └─────┬──────┘  └─────┬──────┘
//!       │ send          │ send          │ send
//!       ▼               ▼               ▼
//! ┌─────────────────────────────────────────────┐
//! │ QueueRunner                                 │
//! │   Mutex<RingQueue> + Condvar                │
//! │   └── consumer: pop → deliver (off lock)    │
//! └──────────────────────┬──────────────────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │  ListenerRegistry   │  (routes by event key)
//!             └─────────────────────┘
//! ```
//!
//! The synchronous sibling, [`SyncDispatchComponent`], shares the listener
//! surface but delivers inline on the caller with no queue in between.
//!
//! [`SyncDispatchComponent`]: sync_component::SyncDispatchComponent
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use eventq::dispatch::{listener_fn, Event};
//! use eventq::queue::api::AsyncQueueComponent;
//! use eventq::component::Component;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Tick }
//!
//! #[derive(Debug)]
//! struct Tick(u64);
//!
//! impl Event for Tick {
//!     type Key = Kind;
//!     fn key(&self) -> Kind { Kind::Tick }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut component = AsyncQueueComponent::<Tick>::new();
//! component.initialize().await?;
//!
//! component.add_listener(Kind::Tick, Box::new(listener_fn(|tick: &Tick| {
//!     println!("tick {}", tick.0);
//!     Ok(())
//! })))?;
//!
//! component.send(Tick(1))?;
//! component.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod component;
mod error;
mod ring;
mod runner;
pub mod sync_component;

pub use component::{AsyncQueueComponent, AsyncQueueOptions, QueueSender};
pub use error::{QueueError, QueueResult};
pub use runner::{QueueRunner, RunnerConfig, RunnerStatus};
pub use sync_component::{SyncDispatchComponent, SyncDispatchOptions};

#[cfg(test)]
mod tests;
