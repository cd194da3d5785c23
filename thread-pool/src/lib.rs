//! A fixed-size worker pool with future-style submission.
//!
//! [`ThreadPool::submit`] queues a closure and returns a [`TaskHandle`]
//! the caller can [`get`](TaskHandle::get) or
//! [`try_get`](TaskHandle::try_get) to block on the result. A panic inside
//! a submitted closure is caught and re-raised through the handle instead
//! of taking down a worker thread.
//!
//! The pool is generic over its backing queue -- [`MsQueue`] by default,
//! or the locked [`BlockingQueue`] -- via the sealed [`TaskQueue`] trait.
//!
//! [`MsQueue`]: mpmc_queue::MsQueue
//! [`BlockingQueue`]: mpmc_queue::BlockingQueue

mod backend;
mod error;
mod pool;
mod task;

pub use backend::TaskQueue;
pub use error::{PoolError, TaskError};
pub use pool::ThreadPool;
pub use task::TaskHandle;
