//! Generic error handling utilities
//!
//! Provides unified error handling that can work across the crate's error
//! types while maintaining domain-specific error logging patterns.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// Configuration mistakes (a malformed `max_size`, an unknown option) are
/// user-actionable: the operator can fix the config and retry. Lifecycle
/// misuse and lock poisoning are system errors: the specific detail belongs
/// in debug logs, not in the operator's face.
///
/// When `is_user_actionable()` returns `true`, `user_message()` should
/// return `Some(message)`; when it returns `false`, `user_message()` should
/// return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error contains a specific, user-actionable message
    /// that should be displayed directly to the user
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors log their own message; system errors log the
/// operation context, with full detail demoted to debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    if error.is_user_actionable() {
        if let Some(user_msg) = error.user_message() {
            log::error!("FATAL: {}", user_msg);
        } else {
            log::error!("FATAL: {}", operation_context);
        }
    } else {
        log::error!("FATAL: {}", operation_context);
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}
