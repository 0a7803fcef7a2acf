//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// A submission is already in flight
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// No target board is configured
    #[error("Board not configured")]
    BoardNotConfigured,

    /// Full-form validation found errors
    #[error("Form has {count} invalid field(s)")]
    ValidationFailed { count: usize },
}
