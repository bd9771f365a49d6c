/*!
 * Lock-Free Signal Statistics
 * Counters updated outside the signal mutex
 */

use super::types::SignalStats;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Atomic signal statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing with the signal state
/// - Relaxed increments; snapshots are for monitoring, not coordination
#[repr(C, align(64))]
pub struct AtomicSignalStats {
    advances: AtomicU64,
    waits_blocked: AtomicU64,
    wakeups: AtomicU64,
    spurious_wakeups: AtomicU64,
    holds_interrupted: AtomicU64,
    waiting: AtomicUsize,
}

impl AtomicSignalStats {
    /// Create new atomic stats
    #[inline]
    pub const fn new() -> Self {
        Self {
            advances: AtomicU64::new(0),
            waits_blocked: AtomicU64::new(0),
            wakeups: AtomicU64::new(0),
            spurious_wakeups: AtomicU64::new(0),
            holds_interrupted: AtomicU64::new(0),
            waiting: AtomicUsize::new(0),
        }
    }

    #[inline(always)]
    pub fn inc_advances(&self) {
        self.advances.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_waits_blocked(&self) {
        self.waits_blocked.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_wakeups(&self) {
        self.wakeups.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_spurious_wakeups(&self) {
        self.spurious_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_holds_interrupted(&self) {
        self.holds_interrupted.fetch_add(1, Ordering::Relaxed);
    }

    /// Mark a waiter as parked
    ///
    /// Release pairs with the Acquire in `waiting()` so a thread that sees the
    /// count also sees the waiter registered under the signal mutex.
    #[inline(always)]
    pub fn enter_wait(&self) {
        self.waiting.fetch_add(1, Ordering::Release);
    }

    #[inline(always)]
    pub fn leave_wait(&self) {
        self.waiting.fetch_sub(1, Ordering::Release);
    }

    #[inline]
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::Acquire)
    }

    /// Get snapshot of current stats (no locks required)
    ///
    /// # Note
    /// Values may not be perfectly consistent with each other due to concurrent updates,
    /// but each individual value is accurate. This is acceptable for monitoring.
    #[inline]
    pub fn snapshot(&self) -> SignalStats {
        SignalStats {
            advances: self.advances.load(Ordering::Acquire),
            waits_blocked: self.waits_blocked.load(Ordering::Acquire),
            wakeups: self.wakeups.load(Ordering::Acquire),
            spurious_wakeups: self.spurious_wakeups.load(Ordering::Acquire),
            holds_interrupted: self.holds_interrupted.load(Ordering::Acquire),
            waiting: self.waiting.load(Ordering::Acquire),
        }
    }
}

impl Default for AtomicSignalStats {
    fn default() -> Self {
        Self::new()
    }
}
