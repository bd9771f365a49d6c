/*!
 * Signal Controller
 *
 * Single source of truth for which road holds green, plus the condvar that
 * lets road workers block until their turn without polling.
 *
 * # Design: One Mutex, One Condvar
 *
 * The current green and every predicate check live behind one
 * `parking_lot::Mutex`. All waiters (green waits and holds) share one
 * `Condvar`; every state change broadcasts with `notify_all` and each waiter
 * re-tests its own predicate, so a wake-up meant for another road is harmless.
 *
 * The stop flag is an `AtomicBool` for lock-free reads, but it is only ever
 * set while the mutex is held. A waiter that tested the flag under the mutex
 * is therefore either already parked when the broadcast fires or will see the
 * flag on its next check; no stop is lost.
 */

use super::atomic_stats::AtomicSignalStats;
use super::types::{GreenWait, HoldOutcome, SignalStats};
use crate::core::types::Road;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// State guarded by the signal mutex
#[derive(Debug)]
struct SignalState {
    current: Road,
}

/// Shared four-way signal
///
/// Created once by the orchestrator and shared with every road worker via
/// `Arc`. Starts with `Road::FIRST` green.
pub struct SignalController {
    state: Mutex<SignalState>,
    changed: Condvar,
    stopped: AtomicBool,
    stats: AtomicSignalStats,
}

impl SignalController {
    /// Create a controller with `Road::FIRST` green
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SignalState {
                current: Road::FIRST,
            }),
            changed: Condvar::new(),
            stopped: AtomicBool::new(false),
            stats: AtomicSignalStats::new(),
        }
    }

    /// Move green to the next road in cycling order and wake every waiter
    ///
    /// Returns the road that is now green.
    pub fn advance(&self) -> Road {
        let mut state = self.state.lock();
        let next = self.advance_locked(&mut state);
        drop(state);

        self.changed.notify_all();
        next
    }

    /// Hand green off from `road`, if `road` still holds it
    ///
    /// The check and the transition happen under one lock acquisition. Returns
    /// `None` without advancing when another road is green or the controller
    /// has been stopped.
    pub fn advance_if_green(&self, road: Road) -> Option<Road> {
        let mut state = self.state.lock();
        if self.is_stopped() || state.current != road {
            return None;
        }
        let next = self.advance_locked(&mut state);
        drop(state);

        self.changed.notify_all();
        Some(next)
    }

    fn advance_locked(&self, state: &mut MutexGuard<'_, SignalState>) -> Road {
        let previous = state.current;
        state.current = previous.next();
        self.stats.inc_advances();
        trace!(from = %previous, to = %state.current, "Signal advanced");
        state.current
    }

    /// Check whether `road` holds green right now
    #[inline]
    pub fn is_green(&self, road: Road) -> bool {
        self.state.lock().current == road
    }

    /// Road holding green right now
    #[inline]
    pub fn current_green(&self) -> Road {
        self.state.lock().current
    }

    /// Block until `road` is green or the controller is stopped
    ///
    /// Returns at once when the road is already green. Never returns
    /// `GreenWait::TimedOut`.
    pub fn wait_for_green(&self, road: Road) -> GreenWait {
        self.wait_inner(road, None)
    }

    /// Like `wait_for_green`, giving up after `timeout`
    pub fn wait_for_green_timeout(&self, road: Road, timeout: Duration) -> GreenWait {
        self.wait_inner(road, Some(Instant::now() + timeout))
    }

    fn wait_inner(&self, road: Road, deadline: Option<Instant>) -> GreenWait {
        let mut state = self.state.lock();

        if let Some(outcome) = self.resolve(&state, road) {
            return outcome;
        }

        self.stats.inc_waits_blocked();
        debug!(road = %road, green = %state.current, "Waiting for green");

        loop {
            self.stats.enter_wait();
            let timed_out = match deadline {
                Some(deadline) => self.changed.wait_until(&mut state, deadline).timed_out(),
                None => {
                    self.changed.wait(&mut state);
                    false
                }
            };
            self.stats.leave_wait();

            // Predicate is re-tested after every wake, timed out or not
            if let Some(outcome) = self.resolve(&state, road) {
                if !timed_out {
                    self.stats.inc_wakeups();
                }
                return outcome;
            }

            if timed_out {
                return GreenWait::TimedOut;
            }

            self.stats.inc_wakeups();
            self.stats.inc_spurious_wakeups();
        }
    }

    /// Decide a wait under the lock; stop takes precedence over green
    #[inline]
    fn resolve(&self, state: &SignalState, road: Road) -> Option<GreenWait> {
        if self.is_stopped() {
            Some(GreenWait::Stopped)
        } else if state.current == road {
            Some(GreenWait::Granted)
        } else {
            None
        }
    }

    /// Sleep for a green hold, waking early if the controller is stopped
    ///
    /// The signal mutex is released while sleeping, so `is_green` and the
    /// other readers are never blocked by a hold.
    pub fn hold(&self, duration: Duration) -> HoldOutcome {
        let deadline = Instant::now() + duration;
        let mut state = self.state.lock();

        while !self.is_stopped() {
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                if self.is_stopped() {
                    break;
                }
                return HoldOutcome::Elapsed;
            }
        }

        self.stats.inc_holds_interrupted();
        HoldOutcome::Interrupted
    }

    /// Broadcast shutdown to every waiter and holder
    ///
    /// Idempotent. Waiters return `GreenWait::Stopped` whether or not their
    /// road ever turned green.
    pub fn stop(&self) {
        let state = self.state.lock();
        let first = !self.stopped.swap(true, Ordering::AcqRel);
        let green = state.current;
        drop(state);

        self.changed.notify_all();

        if first {
            info!(green = %green, waiting = self.stats.waiting(), "Signal stopped");
        }
    }

    /// Check whether `stop` has been called (lock-free)
    #[inline(always)]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Number of threads blocked in `wait_for_green` right now
    #[inline]
    pub fn waiting(&self) -> usize {
        self.stats.waiting()
    }

    /// Snapshot of controller statistics
    pub fn stats(&self) -> SignalStats {
        self.stats.snapshot()
    }
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SignalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalController")
            .field("current", &self.current_green())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
