//! Public API for the queue components
//!
//! External modules should import from here rather than directly from
//! internal modules. See the module documentation for architecture details.

// Components and producer handles
pub use crate::queue::component::{AsyncQueueComponent, AsyncQueueOptions, QueueSender};
pub use crate::queue::sync_component::{SyncDispatchComponent, SyncDispatchOptions};

// Runner for hosts that embed the pipeline without the component harness
pub use crate::queue::runner::{QueueRunner, RunnerConfig, RunnerStatus, DEFAULT_MAX_SIZE};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};
