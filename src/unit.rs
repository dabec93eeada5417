//! # Wait units
//!
//! Marker types naming the time unit a [`RawSpinLock`](crate::RawSpinLock)'s
//! default wait is written in. The unit and the count together form the
//! lock's default spin phase, e.g. `RawSpinLock<Micros, 100>` spins for
//! 100µs before yielding.
//!
//! Every unit converts into [`Duration`] exactly: `Duration` counts whole
//! nanoseconds, and each unit here is a whole number of nanoseconds.
//!
//! ## Example
//! ```rust
//! use core::time::Duration;
//! use phased_spinlock::unit::{wait_duration, Micros, Millis};
//!
//! assert_eq!(wait_duration::<Micros>(250), Duration::from_micros(250));
//! assert_eq!(wait_duration::<Millis>(3), Duration::from_millis(3));
//! ```
//!
//! A unit that does not divide one second evenly is rejected when used:
//!
//! ```compile_fail
//! use phased_spinlock::unit::{wait_duration, WaitUnit};
//!
//! struct Thirds;
//!
//! impl WaitUnit for Thirds {
//!     const NANOS: u32 = 3;
//! }
//!
//! let _ = wait_duration::<Thirds>(333_333_333);
//! ```

use core::marker::PhantomData;
use core::time::Duration;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A unit of time usable as the default wait of a spinlock.
///
/// `NANOS` must be nonzero and divide one second evenly; anything else fails
/// to compile once the unit is converted. Coarser units than a second are
/// not supported: a spin phase that long is no longer a spin.
pub trait WaitUnit {
    /// Length of one unit in nanoseconds.
    const NANOS: u32;
}

/// Nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nanos;

/// Microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Micros;

/// Milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Millis;

/// Seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Secs;

impl WaitUnit for Nanos {
    const NANOS: u32 = 1;
}

impl WaitUnit for Micros {
    const NANOS: u32 = 1_000;
}

impl WaitUnit for Millis {
    const NANOS: u32 = 1_000_000;
}

impl WaitUnit for Secs {
    const NANOS: u32 = NANOS_PER_SEC;
}

pub(crate) struct UnitCheck<U>(PhantomData<fn() -> U>);

impl<U: WaitUnit> UnitCheck<U> {
    pub(crate) const DIVIDES_SECOND: () = assert!(
        U::NANOS > 0 && U::NANOS <= NANOS_PER_SEC && NANOS_PER_SEC % U::NANOS == 0,
        "wait unit must evenly divide one second"
    );
}

/// Converts `count` units of `U` into a [`Duration`].
///
/// Splits the count into whole seconds and a sub-second remainder first, so
/// no count overflows the intermediate arithmetic.
#[inline]
pub const fn wait_duration<U: WaitUnit>(count: u64) -> Duration {
    let () = UnitCheck::<U>::DIVIDES_SECOND;
    let per_sec = (NANOS_PER_SEC / U::NANOS) as u64;
    let secs = count / per_sec;
    let nanos = (count % per_sec) * U::NANOS as u64;
    Duration::new(secs, nanos as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_match_std_constructors() {
        assert_eq!(wait_duration::<Nanos>(1_500), Duration::from_nanos(1_500));
        assert_eq!(wait_duration::<Micros>(1_500), Duration::from_micros(1_500));
        assert_eq!(wait_duration::<Millis>(1_500), Duration::from_millis(1_500));
        assert_eq!(wait_duration::<Secs>(15), Duration::from_secs(15));
    }

    /// Counts that would overflow a naive `count * NANOS` product.
    #[test]
    fn test_large_counts_do_not_overflow() {
        assert_eq!(wait_duration::<Nanos>(u64::MAX), Duration::from_nanos(u64::MAX));
        assert_eq!(wait_duration::<Millis>(u64::MAX), Duration::from_millis(u64::MAX));
        assert_eq!(wait_duration::<Secs>(u64::MAX), Duration::from_secs(u64::MAX));
    }

    /// Units defined outside the crate convert exactly when they divide a second.
    #[test]
    fn test_custom_unit_converts_exactly() {
        struct Tenths;

        impl WaitUnit for Tenths {
            const NANOS: u32 = 100_000_000;
        }

        assert_eq!(wait_duration::<Tenths>(7), Duration::from_millis(700));
        assert_eq!(wait_duration::<Tenths>(25), Duration::from_millis(2_500));
    }

    #[test]
    fn test_usable_in_const_context() {
        const WAIT: Duration = wait_duration::<Micros>(100);
        assert_eq!(WAIT.as_nanos(), 100_000);
    }
}
