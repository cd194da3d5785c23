// Fixed-size worker pool over a `TaskQueue`. Workers spin on a
// non-blocking `try_pop`, yielding to the scheduler when the queue is
// empty -- this keeps the worker loop identical regardless of whether
// the backing queue is the lock-free `MsQueue` or the locked
// `BlockingQueue`, and keeps `stop`'s "flip a flag, workers notice"
// shutdown simple to reason about.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use mpmc_queue::MsQueue;

use crate::backend::TaskQueue;
use crate::error::PoolError;
use crate::task::{new_task, Task, TaskHandle};

struct PoolInner<Q: TaskQueue> {
    queue: Q,
    outstanding: AtomicUsize,
    running: AtomicBool,
    drain: AtomicBool,
    completion_lock: Mutex<()>,
    completion_cv: Condvar,
    worker_count: usize,
}

impl<Q: TaskQueue> PoolInner<Q> {
    fn on_task_complete(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _guard = self.completion_lock.lock().unwrap();
            self.completion_cv.notify_all();
        }
    }
}

fn worker_loop<Q: TaskQueue>(inner: Arc<PoolInner<Q>>) {
    loop {
        if inner.running.load(Ordering::Acquire) {
            match inner.queue.try_pop() {
                Some(task) => task.run(),
                None => thread::yield_now(),
            }
        } else if inner.drain.load(Ordering::Acquire) {
            match inner.queue.try_pop() {
                Some(task) => task.run(),
                None => break,
            }
        } else {
            break;
        }
    }
}

/// A fixed-size pool of worker threads that execute submitted closures
/// and hand their results back through a [`TaskHandle`].
///
/// Generic over the queue backend ([`MsQueue`] by default, or
/// [`BlockingQueue`](mpmc_queue::BlockingQueue)) so callers who want the
/// locked queue's simplicity can opt into it without a different pool
/// type.
pub struct ThreadPool<Q: TaskQueue = MsQueue<Task>> {
    inner: Arc<PoolInner<Q>>,
    workers: Mutex<Vec<Option<thread::JoinHandle<()>>>>,
}

impl<Q: TaskQueue> ThreadPool<Q> {
    /// Spawns `worker_count` worker threads. Fails if `worker_count` is
    /// zero.
    pub fn new(worker_count: usize) -> Result<Self, PoolError> {
        if worker_count == 0 {
            return Err(PoolError::InvalidWorkerCount);
        }

        let inner = Arc::new(PoolInner {
            queue: Q::new(),
            outstanding: AtomicUsize::new(0),
            running: AtomicBool::new(true),
            drain: AtomicBool::new(false),
            completion_lock: Mutex::new(()),
            completion_cv: Condvar::new(),
            worker_count,
        });

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let worker_inner = Arc::clone(&inner);
            let handle = thread::Builder::new()
                .name(format!("pool-worker-{id}"))
                .spawn(move || worker_loop(worker_inner))
                .expect("failed to spawn pool worker thread");
            workers.push(Some(handle));
        }

        tracing::info!(worker_count, "thread pool started");

        Ok(ThreadPool {
            inner,
            workers: Mutex::new(workers),
        })
    }

    /// Spawns one worker thread per available CPU, falling back to one
    /// if the platform can't report a parallelism hint.
    pub fn default_sized() -> Result<Self, PoolError> {
        let worker_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(worker_count)
    }

    /// Queues `f` for execution and returns a handle to its eventual
    /// result. Fails with [`PoolError::Stopped`] if the pool is no
    /// longer accepting work.
    pub fn submit<F, T>(&self, f: F) -> Result<TaskHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if !self.inner.running.load(Ordering::Acquire) {
            return Err(PoolError::Stopped);
        }

        let hook_inner = Arc::clone(&self.inner);
        let (task, handle) = new_task(f, move || hook_inner.on_task_complete());

        // Counted before it's visible on the queue, so `wait_all` can
        // never observe a zero count while this task is in flight.
        self.inner.outstanding.fetch_add(1, Ordering::AcqRel);

        if !self.inner.running.load(Ordering::Acquire) {
            // Lost the race with a concurrent `stop`: the queue may
            // already have been drained and the workers joined, so
            // don't enqueue into a pool nobody is servicing anymore.
            // Route the compensating decrement through `on_task_complete`
            // (not a bare `fetch_sub`) so a `wait_all`/`stop(true)` caller
            // blocked on the transient non-zero count this increment
            // caused still gets woken if this brings the counter to zero.
            self.inner.on_task_complete();
            return Err(PoolError::Stopped);
        }

        self.inner.queue.push(task);
        Ok(handle)
    }

    /// Blocks the caller until every task submitted so far has either
    /// run to completion or been abandoned.
    pub fn wait_all(&self) {
        let mut guard = self.inner.completion_lock.lock().unwrap();
        while self.inner.outstanding.load(Ordering::Acquire) != 0 {
            guard = self.inner.completion_cv.wait(guard).unwrap();
        }
    }

    /// Number of tasks queued or currently executing.
    pub fn pending_tasks(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Number of worker threads this pool was built with.
    pub fn thread_count(&self) -> usize {
        self.inner.worker_count
    }

    /// Whether the pool is still accepting new submissions.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// Stops the pool. With `drain = true`, every already-queued task
    /// still runs before workers exit. With `drain = false`, queued
    /// tasks that haven't started are discarded immediately -- their
    /// handles resolve to [`TaskError::Abandoned`](crate::TaskError::Abandoned)
    /// -- while tasks already executing are left to finish.
    ///
    /// Idempotent: a second call on an already-stopped pool is a no-op.
    pub fn stop(&self, drain: bool) {
        if self
            .inner
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        self.inner.drain.store(drain, Ordering::Release);

        if drain {
            self.wait_all();
        } else {
            while let Some(task) = self.inner.queue.try_pop() {
                task.abandon();
            }
            // Wake any `wait_all` caller stuck on outstanding-executing
            // tasks finishing; abandonment alone may have already hit
            // zero, in which case this is a harmless extra notify.
            let guard = self.inner.completion_lock.lock().unwrap();
            drop(guard);
            self.inner.completion_cv.notify_all();
        }

        self.join_workers();
        tracing::info!(drain, "thread pool stopped");
    }

    fn join_workers(&self) {
        let mut workers = self.workers.lock().unwrap();
        for worker in workers.iter_mut() {
            if let Some(handle) = worker.take() {
                let _ = handle.join();
            }
        }
    }
}

impl<Q: TaskQueue> Drop for ThreadPool<Q> {
    fn drop(&mut self) {
        self.stop(true);
    }
}
