/*!
 * Signal Types
 * Wake reasons and statistics for the intersection signal
 */

use serde::{Deserialize, Serialize};

/// Why a `wait_for_green` call returned
///
/// Stop always wins: once the controller is stopped no waiter is granted,
/// even if its road happens to be green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreenWait {
    /// The awaited road is green
    Granted,
    /// The controller was stopped
    Stopped,
    /// The timeout elapsed with the road still red
    TimedOut,
}

impl GreenWait {
    /// Check if the caller now holds green
    #[inline(always)]
    pub fn is_granted(&self) -> bool {
        matches!(self, GreenWait::Granted)
    }
}

/// How a green hold ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldOutcome {
    /// The full hold duration passed
    Elapsed,
    /// A stop cut the hold short
    Interrupted,
}

/// Signal statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalStats {
    /// Completed `advance` transitions
    pub advances: u64,
    /// Calls to `wait_for_green` that had to block at least once
    pub waits_blocked: u64,
    /// Times a blocked waiter was woken
    pub wakeups: u64,
    /// Wake-ups after which the waiter's road was still red
    pub spurious_wakeups: u64,
    /// Holds cut short by a stop
    pub holds_interrupted: u64,
    /// Waiters blocked right now
    pub waiting: usize,
}
