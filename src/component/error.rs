//! Component Error Types

use crate::queue::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// Malformed or unrecognized options; fatal at configure/initialize
    #[error("unsupported configuration: {message}")]
    UnsupportedConfiguration { message: String },

    /// Lifecycle misuse: an operation outside the component's running window
    #[error("component is not running")]
    NotRunning,

    /// No factory registered under the requested name
    #[error("unknown component: {name}")]
    UnknownComponent { name: String },

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("component internal error: {message}")]
    Internal { message: String },
}

/// Result type for component lifecycle operations
pub type ComponentResult<T> = Result<T, ComponentError>;

impl crate::core::error_handling::ContextualError for ComponentError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            ComponentError::UnsupportedConfiguration { .. } | ComponentError::UnknownComponent { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ComponentError::UnsupportedConfiguration { message } => Some(message),
            _ => None,
        }
    }
}
