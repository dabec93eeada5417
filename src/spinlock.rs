//! # SpinLock
//!
//! Guard-based access to data protected by a [`RawSpinLock`].
//!
//! [`RawSpinLock`] implements [`lock_api::RawMutex`], so any helper written
//! against that trait can drive it. [`SpinLock<T>`] is the ready-made
//! [`lock_api::Mutex`] over it: locking returns a [`SpinLockGuard`] that
//! derefs to the data and unlocks when dropped.
//!
//! ## Example
//! ```rust
//! use phased_spinlock::SpinLock;
//!
//! static COUNTER: SpinLock<u32> = SpinLock::new(0);
//!
//! fn increment() {
//!     let mut guard = COUNTER.lock();
//!     *guard += 1;
//! }
//!
//! increment();
//! assert_eq!(*COUNTER.lock(), 1);
//! ```
//!
//! A different default wait is chosen through the type:
//! ```rust
//! use phased_spinlock::{unit::Nanos, SpinLock};
//!
//! let lock: SpinLock<Vec<u8>, Nanos, 500> = SpinLock::new(Vec::new());
//! lock.lock().push(1);
//! assert_eq!(lock.try_lock().map(|v| v.len()), Some(1));
//! ```

use lock_api::{GuardSend, RawMutex};

use crate::raw::DEFAULT_WAIT_MICROS;
use crate::unit::{Micros, WaitUnit};
use crate::RawSpinLock;

/// A spinlock owning the data it protects.
pub type SpinLock<T, U = Micros, const WAIT: u64 = DEFAULT_WAIT_MICROS> =
    lock_api::Mutex<RawSpinLock<U, WAIT>, T>;

/// RAII guard returned by [`SpinLock::lock`]; unlocks on drop.
pub type SpinLockGuard<'a, T, U = Micros, const WAIT: u64 = DEFAULT_WAIT_MICROS> =
    lock_api::MutexGuard<'a, RawSpinLock<U, WAIT>, T>;

// Safety: `try_lock`/`lock` only succeed on a free -> held transition made by
// an atomic swap, so at most one holder exists at a time.
unsafe impl<U: WaitUnit, const WAIT: u64> RawMutex for RawSpinLock<U, WAIT> {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = RawSpinLock::new();

    type GuardMarker = GuardSend;

    #[inline]
    fn lock(&self) {
        self.lock_for(Self::DEFAULT_WAIT_TIME);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        RawSpinLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        RawSpinLock::unlock(self)
    }

    #[inline]
    fn is_locked(&self) -> bool {
        RawSpinLock::is_locked(self)
    }
}
