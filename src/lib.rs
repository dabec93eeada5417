//! # phased-spinlock
//!
//! A busy-wait mutual exclusion primitive for **short critical sections**
//! shared between threads, without kernel-level blocking.
//!
//! The crate includes:
//!
//! - [`RawSpinLock`] — the lock itself: construct, `lock`, `try_lock`, `unlock`.
//! - [`SpinPhase`] — the spin-then-yield cadence `lock` waits with.
//! - [`SpinLock<T>`] — a [`lock_api::Mutex`] over [`RawSpinLock`] with an
//!   RAII guard.
//!
//! ## Quick Example
//!
//! ```rust
//! use phased_spinlock::{RawSpinLock, SpinLock};
//!
//! // The bare primitive.
//! let raw: RawSpinLock = RawSpinLock::new();
//! raw.lock();
//! assert!(!raw.try_lock());
//! unsafe { raw.unlock() };
//!
//! // Guarded data.
//! let lock: SpinLock<i32> = SpinLock::new(0);
//! {
//!     let mut guard = lock.lock();
//!     *guard += 1;
//! } // automatically unlocked when guard is dropped
//! assert_eq!(*lock.lock(), 1);
//! ```
//!
//! ## Design
//!
//! ### Acquisition
//!
//! The lock state is a single [`AtomicBool`](core::sync::atomic::AtomicBool).
//! Claiming it is a test-and-set with **Acquire** ordering, and releasing it
//! is a store with **Release** ordering, so every write made by one holder is
//! visible to the next.
//!
//! ### Waiting
//!
//! A contended `lock` polls the flag for one phase of wall-clock time (the
//! type's default wait, e.g. 100µs, or a per-call override through
//! [`RawSpinLock::lock_for`]). When the phase runs out, the thread yields
//! once to the scheduler and starts a new phase. `lock` never gives up.
//!
//! ## Usage Notes
//!
//! - Not re-entrant, not fair, not usable across processes.
//! - Never hold a spinlock during blocking or long-running operations.
//!
//! ## Feature flags
//!
//! - **`log`** — trace records each time a waiter's spin phase expires.

pub mod phase;
pub mod raw;
pub mod spinlock;
pub mod unit;

pub use phase::SpinPhase;
pub use raw::RawSpinLock;
pub use spinlock::{SpinLock, SpinLockGuard};
