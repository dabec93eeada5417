//! # RawSpinLock
//!
//! A busy-wait mutual exclusion primitive that protects no data of its own.
//! It is the lock state only: one atomic flag, claimed with an acquire-ordered
//! test-and-set and released with a release-ordered store.
//!
//! [`RawSpinLock::lock`] never parks the thread in the kernel. It polls the
//! flag for one spin phase (the lock's default wait time, or the duration
//! passed to [`RawSpinLock::lock_for`]), then yields to the scheduler once and
//! starts another phase, until the claim succeeds. See [`SpinPhase`].
//!
//! ## Configuration
//! The default wait is part of the type: `RawSpinLock<U, WAIT>` waits `WAIT`
//! units of [`U`](crate::unit::WaitUnit) per phase. A zero count does not
//! compile:
//!
//! ```compile_fail
//! use phased_spinlock::{unit::Micros, RawSpinLock};
//!
//! let lock = RawSpinLock::<Micros, 0>::new();
//! lock.lock();
//! ```
//!
//! Neither does a unit that does not divide one second evenly:
//!
//! ```compile_fail
//! use phased_spinlock::{unit::WaitUnit, RawSpinLock};
//!
//! struct Sevenths;
//!
//! impl WaitUnit for Sevenths {
//!     const NANOS: u32 = 7;
//! }
//!
//! let lock = RawSpinLock::<Sevenths, 1>::new();
//! assert!(lock.try_lock());
//! ```
//!
//! ## Safety
//! - Not re-entrant. Locking twice from one thread spins forever.
//! - Not fair. A waiter may lose every race under heavy contention.
//! - [`unlock`](RawSpinLock::unlock) is `unsafe`: only the holder may call it.
//!
//! For guard-based access to protected data, wrap it in
//! [`SpinLock`](crate::SpinLock).
//!
//! ## Example
//! ```rust
//! use phased_spinlock::RawSpinLock;
//!
//! static LOCK: RawSpinLock = RawSpinLock::new();
//!
//! assert!(LOCK.try_lock());
//! assert!(!LOCK.try_lock());
//! unsafe { LOCK.unlock() };
//!
//! LOCK.lock();
//! unsafe { LOCK.unlock() };
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::{
    AtomicBool,
    Ordering::{Acquire, Relaxed, Release},
};
use core::time::Duration;

use crate::unit::{wait_duration, Micros, UnitCheck, WaitUnit};
use crate::SpinPhase;

/// Default spin phase length, in [`Micros`].
pub const DEFAULT_WAIT_MICROS: u64 = 100;

/// A spin-then-yield lock with no protected data.
///
/// Neither `Clone` nor `Copy`. Every operation borrows the lock, so it cannot
/// be moved while any thread is able to reach it.
pub struct RawSpinLock<U: WaitUnit = Micros, const WAIT: u64 = DEFAULT_WAIT_MICROS> {
    locked: AtomicBool,
    _unit: PhantomData<fn() -> U>,
}

impl<U: WaitUnit, const WAIT: u64> RawSpinLock<U, WAIT> {
    const WAIT_IS_POSITIVE: () = assert!(WAIT > 0, "default wait count must be nonzero");

    /// The phase length used by [`lock`](Self::lock).
    pub const DEFAULT_WAIT_TIME: Duration = {
        let () = Self::WAIT_IS_POSITIVE;
        wait_duration::<U>(WAIT)
    };

    /// Creates an unlocked lock.
    #[inline(always)]
    pub const fn new() -> Self {
        let () = Self::WAIT_IS_POSITIVE;
        let () = UnitCheck::<U>::DIVIDES_SECOND;
        Self {
            locked: AtomicBool::new(false),
            _unit: PhantomData,
        }
    }

    /// Acquires the lock, spinning in phases of [`DEFAULT_WAIT_TIME`](Self::DEFAULT_WAIT_TIME).
    #[inline]
    pub fn lock(&self) {
        self.lock_for(Self::DEFAULT_WAIT_TIME);
    }

    /// Acquires the lock, spinning in phases of `wait_time`.
    ///
    /// `wait_time` only sets how long each phase spins before yielding. The
    /// call does not return until the lock is held, however long that takes.
    #[inline]
    pub fn lock_for(&self, wait_time: Duration) {
        if self.claim() {
            return;
        }
        self.lock_contended(wait_time);
    }

    #[cold]
    fn lock_contended(&self, wait_time: Duration) {
        let phase = SpinPhase::new(wait_time);
        while !self.claim() {
            phase.wait();
        }
    }

    /// Makes a single attempt to acquire the lock.
    ///
    /// Returns `false` and leaves the lock untouched if it is already held.
    #[inline]
    pub fn try_lock(&self) -> bool {
        self.claim()
    }

    /// Releases the lock.
    ///
    /// # Safety
    /// - Only call this if you *own* the lock.
    /// - Unlocking a free lock, or one held by someone else, breaks mutual
    ///   exclusion for every other user.
    #[inline]
    pub unsafe fn unlock(&self) {
        self.locked.store(false, Release);
    }

    /// Checks whether the lock is currently held.
    ///
    /// The answer may already be stale when it returns; it does not
    /// synchronize with the holder.
    #[inline(always)]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Relaxed)
    }

    // Test-and-set. Acquire pairs with the Release in `unlock`, so the new
    // holder sees every write the previous holder made.
    #[inline(always)]
    fn claim(&self) -> bool {
        !self.locked.swap(true, Acquire)
    }
}

impl<U: WaitUnit, const WAIT: u64> Default for RawSpinLock<U, WAIT> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<U: WaitUnit, const WAIT: u64> fmt::Debug for RawSpinLock<U, WAIT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSpinLock")
            .field("locked", &self.is_locked())
            .field("default_wait_time", &Self::DEFAULT_WAIT_TIME)
            .finish()
    }
}
