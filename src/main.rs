//! Demonstrates `SpinLock` from the `phased-spinlock` crate.
//!
//! Spawns 16 threads, each incrementing a shared counter a hundred thousand
//! times under the lock, then checks nothing was lost.

use phased_spinlock::{unit::Micros, SpinLock};
use std::thread;
use std::time::Instant;

const THREADS: u64 = 16;
const ROUNDS: u64 = 100_000;

// Spin for 20µs before each yield.
static COUNTER: SpinLock<u64, Micros, 20> = SpinLock::new(0);

fn add() {
    for _ in 0..ROUNDS {
        *COUNTER.lock() += 1;
    }
}

fn main() {
    println!("Starting spinlock test with {} threads...", THREADS);
    let started = Instant::now();

    let threads: Vec<_> = (0..THREADS).map(|_| thread::spawn(add)).collect();
    for t in threads {
        t.join().unwrap();
    }

    let total = *COUNTER.lock();
    println!("Final counter value: {} in {:?}", total, started.elapsed());
    assert_eq!(total, THREADS * ROUNDS);
}
