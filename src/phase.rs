//! # SpinPhase
//!
//! The spin-then-yield cadence used by [`RawSpinLock::lock`](crate::RawSpinLock::lock).
//!
//! A waiter polls the lock in a tight loop for one *phase*, a fixed span of
//! wall-clock time measured on the monotonic clock ([`std::time::Instant`]).
//! When the phase runs out, the waiter gives the rest of its time slice back
//! to the scheduler with [`std::thread::yield_now`] and begins a fresh phase.
//! There is no limit on the number of phases.
//!
//! ## Example
//! ```rust
//! use core::time::Duration;
//! use phased_spinlock::SpinPhase;
//!
//! let phase = SpinPhase::new(Duration::from_micros(50));
//!
//! loop {
//!     if try_acquire() {
//!         break;
//!     }
//!     phase.wait();
//! }
//!
//! fn try_acquire() -> bool {
//!     true
//! }
//! ```
//!
//! ## Feature flags
//! - **`log`** — emits a `trace` record each time a phase expires. Covered
//!   by `cargo test --features log`.

use core::cell::Cell;
use core::hint::spin_loop;
use core::time::Duration;
use std::time::Instant;

/// One waiter's position in the spin-then-yield cadence.
///
/// Not shared between threads: each call to `lock` builds its own.
pub struct SpinPhase {
    wait_time: Duration,
    start: Cell<Instant>,
    yields: Cell<u64>,
}

impl SpinPhase {
    /// Starts the first phase now.
    #[inline]
    pub fn new(wait_time: Duration) -> Self {
        Self {
            wait_time,
            start: Cell::new(Instant::now()),
            yields: Cell::new(0),
        }
    }

    /// Length of every phase.
    #[inline(always)]
    pub fn wait_time(&self) -> Duration {
        self.wait_time
    }

    /// Returns `true` once the current phase has lasted `wait_time` or more.
    #[inline]
    pub fn expired(&self) -> bool {
        self.start.get().elapsed() >= self.wait_time
    }

    /// Called after a failed claim.
    ///
    /// Spins once while the phase lasts. Once it has expired, yields the
    /// thread and starts a new phase.
    #[inline]
    pub fn wait(&self) {
        if self.expired() {
            self.yield_now();
        } else {
            spin_loop();
        }
    }

    /// Yields to the scheduler and restarts the phase clock.
    #[inline]
    pub fn yield_now(&self) {
        let yields = self.yields.get() + 1;
        self.yields.set(yields);

        #[cfg(feature = "log")]
        log::trace!(
            "spin phase of {:?} expired, yielding (yield #{})",
            self.wait_time,
            yields
        );

        std::thread::yield_now();
        self.start.set(Instant::now());
    }

    /// Number of times this waiter has yielded so far.
    #[inline(always)]
    pub fn yields(&self) -> u64 {
        self.yields.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_zero_wait_expires_immediately() {
        let phase = SpinPhase::new(Duration::ZERO);
        assert!(phase.expired());

        phase.wait();
        phase.wait();
        assert_eq!(phase.yields(), 2, "every wait should yield with a zero phase");
    }

    #[test]
    fn test_spins_without_yielding_inside_phase() {
        let phase = SpinPhase::new(Duration::from_secs(60));

        for _ in 0..1_000 {
            phase.wait();
        }

        assert!(!phase.expired());
        assert_eq!(phase.yields(), 0, "no yield expected before the phase ends");
    }

    /// After a yield, the elapsed time is measured from the new phase start.
    #[test]
    fn test_yield_restarts_phase() {
        let phase = SpinPhase::new(Duration::from_millis(200));

        sleep(Duration::from_millis(250));
        assert!(phase.expired());

        phase.wait();
        assert_eq!(phase.yields(), 1);
        assert!(!phase.expired(), "phase should restart after yielding");
    }

    #[cfg(feature = "log")]
    #[test]
    fn test_yield_emits_trace_record() {
        use log::{Level, LevelFilter, Log, Metadata, Record};
        use std::sync::atomic::{AtomicUsize, Ordering};

        static TRACES: AtomicUsize = AtomicUsize::new(0);

        struct CountingLogger;

        impl Log for CountingLogger {
            fn enabled(&self, metadata: &Metadata<'_>) -> bool {
                metadata.level() <= Level::Trace
            }

            fn log(&self, record: &Record<'_>) {
                if record.level() == Level::Trace
                    && record.target().starts_with("phased_spinlock::phase")
                {
                    TRACES.fetch_add(1, Ordering::Relaxed);
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: CountingLogger = CountingLogger;
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);

        let before = TRACES.load(Ordering::Relaxed);
        let phase = SpinPhase::new(Duration::ZERO);
        phase.wait();
        phase.wait();

        assert!(
            TRACES.load(Ordering::Relaxed) - before >= 2,
            "each yield should be traced"
        );
    }
}
