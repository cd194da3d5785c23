// Lets `ThreadPool` sit on top of either queue variant `mpmc-queue` ships.
// Sealed so the pool's generic parameter can't be satisfied by a queue we
// haven't validated for this use (in particular: `try_pop` must be
// non-blocking, which is what lets the worker loop observe the `running`
// flag promptly instead of sleeping inside a blocking pop).

use mpmc_queue::{BlockingQueue, MsQueue};

use crate::task::Task;

mod sealed {
    pub trait Sealed {}
}

/// A queue backend a [`ThreadPool`](crate::ThreadPool) can run tasks
/// through. Implemented for `MsQueue` and `BlockingQueue`; not meant to
/// be implemented outside this crate.
pub trait TaskQueue: sealed::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn new() -> Self;
    #[doc(hidden)]
    fn push(&self, task: Task);
    #[doc(hidden)]
    fn try_pop(&self) -> Option<Task>;
}

impl sealed::Sealed for MsQueue<Task> {}

impl TaskQueue for MsQueue<Task> {
    fn new() -> Self {
        MsQueue::new()
    }

    fn push(&self, task: Task) {
        self.enqueue(task)
            .expect("allocation failure enqueueing a task");
    }

    fn try_pop(&self) -> Option<Task> {
        self.dequeue()
    }
}

impl sealed::Sealed for BlockingQueue<Task> {}

impl TaskQueue for BlockingQueue<Task> {
    fn new() -> Self {
        BlockingQueue::new()
    }

    fn push(&self, task: Task) {
        BlockingQueue::push(self, task);
    }

    fn try_pop(&self) -> Option<Task> {
        self.pop()
    }
}
