//! Dispatch Error Types

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("listener failed: {message}")]
    ListenerFailed { message: String },

    #[error("delivery failed for {failed} of {total} listeners on key {key}")]
    DeliveryFailed {
        key: String,
        failed: usize,
        total: usize,
    },

    #[error("dispatch internal error: {message}")]
    Internal { message: String },
}

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

impl crate::core::error_handling::ContextualError for DispatchError {
    fn is_user_actionable(&self) -> bool {
        false // Listener and registry failures are system-level
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}
