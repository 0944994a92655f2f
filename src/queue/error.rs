//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Enqueue or shutdown attempted outside the `Running` window
    #[error("queue component is not running")]
    NotRunning,

    /// Bounded queue at capacity; the event was dropped
    #[error("queue is at capacity (max size: {max_size})")]
    QueueFull { max_size: usize },

    /// Construction-time configuration problem, fatal at initialization
    #[error("unsupported configuration: {message}")]
    UnsupportedConfiguration { message: String },

    /// Lock poisoning or consumer failure; not part of the normal taxonomy
    #[error("queue internal error: {message}")]
    Internal { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

impl crate::core::error_handling::ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, QueueError::UnsupportedConfiguration { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::UnsupportedConfiguration { message } => Some(message),
            _ => None,
        }
    }
}
