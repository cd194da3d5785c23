//! Small demo driving both queue variants from multiple producer threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use mpmc_queue::{BlockingQueue, MsQueue};

fn main() {
    println!("=== mpmc-queue demo ===\n");
    demo_lockfree();
    demo_blocking();
}

fn demo_lockfree() {
    let queue = Arc::new(MsQueue::new());
    let producers = 4;
    let per_producer = 10_000;
    let drained = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();
    let mut handles = Vec::new();
    for p in 0..producers {
        let queue = Arc::clone(&queue);
        handles.push(thread::spawn(move || {
            for i in 0..per_producer {
                queue.enqueue(p * per_producer + i).expect("enqueue");
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    while queue.dequeue().is_some() {
        drained.fetch_add(1, Ordering::Relaxed);
    }

    println!(
        "MsQueue: {} producers x {} items, drained {} in {:?}",
        producers,
        per_producer,
        drained.load(Ordering::Relaxed),
        start.elapsed()
    );
}

fn demo_blocking() {
    let queue = Arc::new(BlockingQueue::new());
    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut sum = 0usize;
            for _ in 0..100 {
                sum += queue.block_pop();
            }
            sum
        })
    };

    for i in 1..=100 {
        queue.push(i);
    }

    let sum = consumer.join().unwrap();
    println!("BlockingQueue: block_pop summed 1..=100 to {sum}");
}
