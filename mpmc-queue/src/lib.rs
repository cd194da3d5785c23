//! Multi-producer/multi-consumer FIFO queues.
//!
//! Two variants, picked for different blocking disciplines:
//!
//! - [`MsQueue`] -- lock-free Michael-Scott queue. Enqueue and dequeue are
//!   CAS-retry loops; no thread ever blocks another.
//! - [`BlockingQueue`] -- a `Mutex` + `Condvar` queue with a genuine
//!   blocking pop ([`BlockingQueue::block_pop`]) for consumers that would
//!   rather sleep than spin.
//!
//! Both are FIFO with respect to a single producer/single consumer view;
//! across multiple producers and consumers the order is a linearisation of
//! each producer's own insertion order.

pub mod error;
pub mod lockfree;
pub mod locked;

pub use error::QueueError;
pub use locked::BlockingQueue;
pub use lockfree::MsQueue;
