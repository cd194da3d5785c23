// Mutex + Condvar queue: the "just block" alternative to the lock-free
// variant. Useful when a consumer genuinely wants to sleep rather than
// spin while the queue is empty (`block_pop`), or when the simplicity of
// a single lock outweighs the lock-free variant's throughput under heavy
// contention.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// A multi-producer/multi-consumer FIFO queue guarded by a mutex.
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        BlockingQueue {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Appends `value` to the tail and wakes one waiting consumer.
    pub fn push(&self, value: T) {
        let mut items = self.items.lock().unwrap();
        items.push_back(value);
        drop(items);
        self.not_empty.notify_one();
    }

    /// Appends every item of `values`, waking one waiter per item pushed.
    pub fn push_bulk<I: IntoIterator<Item = T>>(&self, values: I) {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.extend(values);
        let pushed = items.len() - before;
        drop(items);
        for _ in 0..pushed {
            self.not_empty.notify_one();
        }
    }

    /// Removes and returns the head element, or `None` if empty right now.
    /// Never blocks.
    pub fn pop(&self) -> Option<T> {
        self.items.lock().unwrap().pop_front()
    }

    /// Blocks until the queue is non-empty, then pops. Re-checks the
    /// predicate in a loop so spurious wakeups can't return a bogus value.
    pub fn block_pop(&self) -> T {
        let mut items = self.items.lock().unwrap();
        loop {
            if let Some(value) = items.pop_front() {
                return value;
            }
            items = self.not_empty.wait(items).unwrap();
        }
    }

    /// Best-effort snapshot. Racy under concurrent mutation; use as a hint.
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Current element count.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Drains every element. No notification is sent: the queue is empty
    /// afterward, so there's nothing for a waiter to do.
    pub fn clear(&self) {
        self.items.lock().unwrap().clear();
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
