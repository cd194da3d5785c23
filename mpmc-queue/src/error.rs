use thiserror::Error;

/// Failure modes for the queue variants in this crate.
///
/// Both variants are infallible in ordinary operation -- the only thing
/// that can go wrong on the hot enqueue/push path is allocation failure,
/// which `Box::new` itself aborts on in practice. The `Result` is kept on
/// the public API anyway so callers never have to `unwrap()` a queue op,
/// and so a future allocator-aware build has somewhere to report into.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("failed to allocate a queue node")]
    AllocFailed,
}
