//! Shared atomic counter
//!
//! A signed machine-word counter that any number of threads may bump
//! without holding a lock.

use core::cmp::Ordering as CmpOrdering;
use core::sync::atomic::{AtomicI64, Ordering};

/// Lock-free signed counter
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicI64,
}

impl AtomicCounter {
    /// Creates a counter holding `initial`
    pub const fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
        }
    }

    /// Current value
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Adds `delta` and returns the new value
    pub fn add_and_fetch(&self, delta: i64) -> i64 {
        self.value.fetch_add(delta, Ordering::SeqCst).wrapping_add(delta)
    }

    /// Subtracts `delta` and returns the new value
    pub fn sub_and_fetch(&self, delta: i64) -> i64 {
        self.value.fetch_sub(delta, Ordering::SeqCst).wrapping_sub(delta)
    }

    /// Stores `new` if the counter currently holds `current`
    ///
    /// Returns true when the swap happened.
    pub fn compare_and_swap(&self, current: i64, new: i64) -> bool {
        self.value
            .compare_exchange(current, new, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl PartialEq<i64> for AtomicCounter {
    fn eq(&self, other: &i64) -> bool {
        self.value() == *other
    }
}

impl PartialOrd<i64> for AtomicCounter {
    fn partial_cmp(&self, other: &i64) -> Option<CmpOrdering> {
        Some(self.value().cmp(other))
    }
}
