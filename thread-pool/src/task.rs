// The unit of work queued on a pool: a type-erased closure plus a one-shot
// result slot the submitter can wait on. `Task` itself is two closures --
// `run` and `abandon` -- so whichever path a worker or a stopping pool
// takes, the slot gets resolved and the completion hook fires exactly once.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};

use crate::error::TaskError;

struct Slot<T> {
    value: Mutex<Option<Result<T, TaskError>>>,
    ready: Condvar,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Slot {
            value: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn resolve(&self, result: Result<T, TaskError>) {
        let mut guard = self.value.lock().unwrap();
        *guard = Some(result);
        self.ready.notify_all();
    }

    fn wait(&self) -> Result<T, TaskError> {
        let mut guard = self.value.lock().unwrap();
        loop {
            if let Some(result) = guard.take() {
                return result;
            }
            guard = self.ready.wait(guard).unwrap();
        }
    }
}

/// The consumer half of a submitted task.
///
/// Dropping a handle without calling [`get`](TaskHandle::get) or
/// [`try_get`](TaskHandle::try_get) is harmless: the task still runs (or
/// is abandoned) to completion, its result is just discarded.
pub struct TaskHandle<T> {
    slot: Arc<Slot<T>>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task completes. Re-panics with the original
    /// message if the task panicked, and panics if the task was
    /// abandoned by a non-draining `stop`.
    pub fn get(self) -> T {
        match self.slot.wait() {
            Ok(value) => value,
            Err(TaskError::Panicked(message)) => panic!("{message}"),
            Err(TaskError::Abandoned) => panic!("task was abandoned before it ran"),
        }
    }

    /// Blocks until the task completes, surfacing panics and abandonment
    /// as a `TaskError` instead of propagating a panic.
    pub fn try_get(self) -> Result<T, TaskError> {
        self.slot.wait()
    }
}

/// A queued task: erased to `run()` or `abandon()`, never both.
pub(crate) struct Task {
    run: Box<dyn FnOnce() + Send + 'static>,
    abandon: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    pub(crate) fn run(self) {
        (self.run)()
    }

    pub(crate) fn abandon(self) {
        (self.abandon)()
    }
}

/// Builds a `Task`/`TaskHandle` pair. `on_complete` is invoked exactly
/// once, from whichever of `run`/`abandon` the pool ends up calling --
/// this is the pool's hook for decrementing its outstanding-task count.
pub(crate) fn new_task<F, T>(f: F, on_complete: impl Fn() + Send + Sync + 'static) -> (Task, TaskHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let slot = Arc::new(Slot::new());
    let handle = TaskHandle {
        slot: Arc::clone(&slot),
    };
    let on_complete = Arc::new(on_complete);

    let run_slot = Arc::clone(&slot);
    let run_hook = Arc::clone(&on_complete);
    let run: Box<dyn FnOnce() + Send + 'static> = Box::new(move || {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => Err(TaskError::Panicked(panic_message(payload))),
        };
        run_slot.resolve(outcome);
        run_hook();
    });

    let abandon_slot = slot;
    let abandon_hook = on_complete;
    let abandon: Box<dyn FnOnce() + Send + 'static> = Box::new(move || {
        abandon_slot.resolve(Err(TaskError::Abandoned));
        abandon_hook();
    });

    (Task { run, abandon }, handle)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked with a non-string payload".to_string()
    }
}
