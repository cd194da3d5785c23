// Integration tests shared in shape across both queue variants:
// - basic FIFO push/pop
// - empty-queue behavior
// - concurrent producers/consumers preserve the total count
// - no loss, no duplication under contention

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use mpmc_queue::{BlockingQueue, MsQueue};

// ============================================================================
// MsQueue: BASIC FIFO
// ============================================================================

#[test]
fn msqueue_fifo_single_producer_single_consumer() {
    let queue = MsQueue::new();
    for i in 0..10 {
        queue.enqueue(i).unwrap();
    }
    for i in 0..10 {
        assert_eq!(queue.dequeue(), Some(i));
    }
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn msqueue_dequeue_empty_returns_none() {
    let queue: MsQueue<i32> = MsQueue::new();
    assert_eq!(queue.dequeue(), None);
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn msqueue_is_empty() {
    let queue = MsQueue::new();
    assert!(queue.is_empty());
    queue.enqueue(1).unwrap();
    assert!(!queue.is_empty());
    queue.dequeue();
    assert!(queue.is_empty());
}

#[test]
fn msqueue_clear() {
    let queue = MsQueue::new();
    for i in 0..50 {
        queue.enqueue(i).unwrap();
    }
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.dequeue(), None);
}

#[test]
fn msqueue_drop_with_remaining_elements() {
    let queue = MsQueue::new();
    for i in 0..100 {
        queue.enqueue(i).unwrap();
    }
    // Dropped here; must not leak or panic.
}

#[test]
fn msqueue_with_heap_values() {
    let queue = MsQueue::new();
    queue.enqueue(String::from("first")).unwrap();
    queue.enqueue(String::from("second")).unwrap();
    assert_eq!(queue.dequeue(), Some(String::from("first")));
    assert_eq!(queue.dequeue(), Some(String::from("second")));
}

// ============================================================================
// MsQueue: CONCURRENT
// ============================================================================

#[test]
fn msqueue_concurrent_producers_single_consumer_no_loss_no_dup() {
    let queue = Arc::new(MsQueue::new());
    let producers = 8;
    let per_producer = 2_000;

    let mut handles = Vec::new();
    for p in 0..producers {
        let queue = Arc::clone(&queue);
        handles.push(thread::spawn(move || {
            for i in 0..per_producer {
                queue.enqueue(p * per_producer + i).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let mut seen = HashSet::new();
    while let Some(value) = queue.dequeue() {
        assert!(seen.insert(value), "duplicate value {value}");
    }
    assert_eq!(seen.len(), producers * per_producer);
}

#[test]
fn msqueue_fifo_per_producer() {
    // A single producer's increasing sequence must be observed increasing.
    let queue = Arc::new(MsQueue::new());
    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for i in 0..5_000 {
                queue.enqueue(i).unwrap();
            }
        })
    };
    producer.join().unwrap();

    let mut last = None;
    while let Some(value) = queue.dequeue() {
        if let Some(prev) = last {
            assert!(value > prev, "{value} did not follow {prev}");
        }
        last = Some(value);
    }
}

#[test]
fn msqueue_concurrent_multi_consumer_counts_match() {
    let queue = Arc::new(MsQueue::new());
    let total_items = 8_000usize;
    for i in 0..total_items {
        queue.enqueue(i).unwrap();
    }

    let consumers = 8;
    let drained = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();
    for _ in 0..consumers {
        let queue = Arc::clone(&queue);
        let drained = Arc::clone(&drained);
        handles.push(thread::spawn(move || {
            while queue.dequeue().is_some() {
                drained.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(drained.load(Ordering::SeqCst), total_items);
    assert!(queue.is_empty());
}

// ============================================================================
// BlockingQueue
// ============================================================================

#[test]
fn blocking_queue_fifo() {
    let queue = BlockingQueue::new();
    queue.push(1);
    queue.push(2);
    queue.push(3);
    assert_eq!(queue.pop(), Some(1));
    assert_eq!(queue.pop(), Some(2));
    assert_eq!(queue.pop(), Some(3));
    assert_eq!(queue.pop(), None);
}

#[test]
fn blocking_queue_push_bulk_and_len() {
    let queue = BlockingQueue::new();
    queue.push_bulk(0..10);
    assert_eq!(queue.len(), 10);
    for i in 0..10 {
        assert_eq!(queue.pop(), Some(i));
    }
}

#[test]
fn blocking_queue_block_pop_waits_for_producer() {
    let queue = Arc::new(BlockingQueue::new());
    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.block_pop())
    };

    // Give the consumer a moment to start waiting, then produce.
    thread::sleep(std::time::Duration::from_millis(50));
    queue.push(42);

    assert_eq!(consumer.join().unwrap(), 42);
}

#[test]
fn blocking_queue_concurrent_no_loss_no_dup() {
    let queue = Arc::new(BlockingQueue::new());
    let producers = 4;
    let per_producer = 2_000;

    let mut handles = Vec::new();
    for p in 0..producers {
        let queue = Arc::clone(&queue);
        handles.push(thread::spawn(move || {
            for i in 0..per_producer {
                queue.push(p * per_producer + i);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let mut seen = HashSet::new();
    while let Some(value) = queue.pop() {
        assert!(seen.insert(value));
    }
    assert_eq!(seen.len(), producers * per_producer);
}

#[test]
fn blocking_queue_clear_is_silent() {
    let queue = BlockingQueue::new();
    queue.push_bulk(0..20);
    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
}
