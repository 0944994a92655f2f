//! Synchronization utilities for robust lock handling
//!
//! Producers and lifecycle callers must never panic because some other
//! thread panicked while holding a queue lock. These helpers convert lock
//! poisoning into domain errors so every lock site can propagate with `?`.

use std::sync::{LockResult, RwLockReadGuard, RwLockWriteGuard};

/// Convert a poisoned mutex result into a domain error
///
/// # Arguments
/// * `result` - The result from a mutex lock operation
/// * `error_constructor` - Function to create the appropriate error type
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use eventq::core::sync::handle_mutex_poison;
/// use eventq::queue::api::QueueError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(
///     mutex.lock(),
///     |msg| QueueError::Internal { message: msg }
/// ).unwrap();
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "lock poisoned: a panic occurred while the lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Convert a poisoned RwLock read result into a domain error
pub fn handle_rwlock_read<T, E>(
    result: LockResult<RwLockReadGuard<T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockReadGuard<T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "RwLock read poisoned: a panic occurred while the write lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}

/// Convert a poisoned RwLock write result into a domain error
pub fn handle_rwlock_write<T, E>(
    result: LockResult<RwLockWriteGuard<T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<RwLockWriteGuard<T>, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "RwLock write poisoned: a panic occurred while the lock was held. PoisonError: {:?}",
            poison_err
        ))
    })
}
