/*!
 * Simulation Limits and Defaults
 *
 * Centralized location for run lengths, draw ranges and other magic numbers.
 * Durations are expressed in time units; one unit is `DEFAULT_TIME_UNIT`
 * unless the configuration overrides it.
 */

use std::time::Duration;

// =============================================================================
// TIMING
// =============================================================================

/// Length of one simulated time unit
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

/// Wall-clock length of a run, in time units
pub const DEFAULT_RUN_UNITS: u64 = 30;

/// Shortest green hold, in time units
pub const DEFAULT_HOLD_MIN_UNITS: u64 = 2;

/// Longest green hold, in time units (inclusive)
pub const DEFAULT_HOLD_MAX_UNITS: u64 = 5;

// =============================================================================
// TRAFFIC
// =============================================================================

/// Fewest vehicles passing during one green cycle
pub const DEFAULT_VEHICLES_MIN: u64 = 1;

/// Most vehicles passing during one green cycle (inclusive)
pub const DEFAULT_VEHICLES_MAX: u64 = 5;

// =============================================================================
// THREADS
// =============================================================================

/// Prefix for road worker thread names (`road-north`, ...)
pub const WORKER_THREAD_PREFIX: &str = "road-";

/// Stack size for road worker threads (256KB)
/// Enough for log formatting; the default 2MB is mostly unused
pub const WORKER_STACK_SIZE: usize = 256 * 1024;
