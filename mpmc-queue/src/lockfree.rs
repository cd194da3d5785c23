// Michael-Scott lock-free queue.
//
// A singly linked list with a permanent sentinel at the head. The first
// live payload (if any) sits in the node reachable from `head.next`.
// `tail` is allowed to lag one link behind the true end of the list;
// whichever thread notices the lag helps swing it forward before retrying
// its own operation. Neither enqueue nor dequeue ever blocks: both are
// CAS-retry loops.
//
// ABA note: nodes are freed via `Box::from_raw` as soon as they're
// unlinked. If an allocator ever reused a freed address while another
// thread still held a stale pointer to it, a CAS could succeed against
// the wrong node. We assume it won't happen inside the short window a
// concurrent CAS could observe it; a hardened build would carry hazard
// pointers or epoch-based reclamation (e.g. `crossbeam-epoch`) instead of
// freeing eagerly.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::error::QueueError;

struct Node<T> {
    data: Option<T>,
    next: AtomicPtr<Node<T>>,
}

impl<T> Node<T> {
    fn boxed(data: Option<T>) -> *mut Node<T> {
        Box::into_raw(Box::new(Node {
            data,
            next: AtomicPtr::new(ptr::null_mut()),
        }))
    }
}

/// A lock-free multi-producer/multi-consumer FIFO queue.
///
/// `enqueue` and `dequeue` are both wait-free-amortised under reasonable
/// contention: no thread ever blocks another, they only retry a CAS.
pub struct MsQueue<T> {
    head: AtomicPtr<Node<T>>,
    tail: AtomicPtr<Node<T>>,
}

impl<T> MsQueue<T> {
    /// Creates a new empty queue. Allocates one sentinel node up front.
    pub fn new() -> Self {
        let sentinel = Node::boxed(None);
        MsQueue {
            head: AtomicPtr::new(sentinel),
            tail: AtomicPtr::new(sentinel),
        }
    }

    /// Appends `value` to the tail. Never blocks; always succeeds.
    pub fn enqueue(&self, value: T) -> Result<(), QueueError> {
        let new_node = Node::boxed(Some(value));

        loop {
            let tail = self.tail.load(Ordering::Relaxed);
            // SAFETY: `tail` always points at a node owned by this queue;
            // nodes are only freed after being fully unlinked from both
            // `head` and every predecessor's `next`.
            let tail_next = unsafe { &(*tail).next };
            let next = tail_next.load(Ordering::Acquire);

            if next.is_null() {
                // `tail` really is the last node. Try to link the new node.
                match tail_next.compare_exchange(
                    ptr::null_mut(),
                    new_node,
                    Ordering::Release,
                    Ordering::Acquire,
                ) {
                    Ok(_) => {
                        // Best-effort: swing tail to the node we just linked.
                        // If this CAS fails, some other thread already did it
                        // (or will); either outcome leaves the queue correct.
                        let _ = self.tail.compare_exchange(
                            tail,
                            new_node,
                            Ordering::Release,
                            Ordering::Relaxed,
                        );
                        return Ok(());
                    }
                    Err(_) => continue,
                }
            } else {
                // `tail` is lagging behind the true end; help it catch up
                // before retrying our own link attempt.
                let _ =
                    self.tail
                        .compare_exchange(tail, next, Ordering::Release, Ordering::Relaxed);
            }
        }
    }

    /// Removes and returns the head element, or `None` if the queue was
    /// empty at some linearisation point during the call.
    pub fn dequeue(&self) -> Option<T> {
        loop {
            let head = self.head.load(Ordering::Acquire);
            // SAFETY: see `enqueue`.
            let next = unsafe { (*head).next.load(Ordering::Acquire) };

            if next.is_null() {
                return None;
            }

            match self
                .head
                .compare_exchange(head, next, Ordering::Release, Ordering::Acquire)
            {
                Ok(_) => {
                    // We won: `head` (the old sentinel) is now unreachable
                    // from anywhere else, so we can free it, and `next`
                    // becomes the new sentinel -- its payload is ours.
                    let data = unsafe { (*next).data.take() };
                    unsafe {
                        drop(Box::from_raw(head));
                    }
                    return data;
                }
                Err(_) => continue,
            }
        }
    }

    /// Best-effort snapshot. Racy under concurrent mutation; use as a hint.
    pub fn is_empty(&self) -> bool {
        let head = self.head.load(Ordering::Acquire);
        // SAFETY: see `enqueue`.
        unsafe { (*head).next.load(Ordering::Acquire).is_null() }
    }

    /// Drains every element. Only safe when no concurrent enqueue/dequeue
    /// is in flight -- the pool relies on this when discarding tasks after
    /// an abandon-stop.
    pub fn clear(&self) {
        while self.dequeue().is_some() {}
    }
}

impl<T> Drop for MsQueue<T> {
    fn drop(&mut self) {
        let mut current = *self.head.get_mut();
        while !current.is_null() {
            // SAFETY: `&mut self` guarantees no concurrent access; each
            // node on this chain was heap-allocated via `Node::boxed`.
            unsafe {
                let node = Box::from_raw(current);
                current = node.next.load(Ordering::Relaxed);
            }
        }
    }
}

impl<T> Default for MsQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: all shared state is either atomic or reached only through a CAS
// that hands off exclusive ownership to exactly one thread.
unsafe impl<T: Send> Send for MsQueue<T> {}
unsafe impl<T: Send> Sync for MsQueue<T> {}
