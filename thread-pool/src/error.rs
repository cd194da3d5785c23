use thiserror::Error;

/// Failure modes for pool construction and submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("thread pool worker count must be greater than zero")]
    InvalidWorkerCount,
    #[error("thread pool is stopped")]
    Stopped,
}

/// Why a submitted task's outcome is an error instead of its return value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task's closure panicked; the message is the panic payload,
    /// downcast to a string where possible.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// The pool was stopped with `stop(false)` before this task ran, and
    /// it was discarded rather than executed.
    #[error("task was abandoned by a non-draining pool stop")]
    Abandoned,
}
