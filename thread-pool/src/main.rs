//! Small demo: submit work, wait on futures, then drain-stop the pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use thread_pool::ThreadPool;

fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    println!("=== Thread Pool Demo ===\n");

    let pool = ThreadPool::new(4).expect("worker count must be non-zero");
    let counter = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8usize)
        .map(|i| {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                i * i
            })
            .expect("pool accepts submissions")
        })
        .collect();

    let squares: Vec<usize> = handles.into_iter().map(|h| h.get()).collect();

    println!("workers: {}", pool.thread_count());
    println!("jobs completed: {}", counter.load(Ordering::SeqCst));
    println!("squares: {squares:?}");

    pool.stop(true);
    println!("pool running after stop: {}", pool.is_running());
}
