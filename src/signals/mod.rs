/*!
 * Signals Module
 * Shared four-way traffic signal with blocking waits
 */

mod atomic_stats;
mod controller;
pub mod types;

// Re-export public API
pub use controller::SignalController;
pub use types::{GreenWait, HoldOutcome, SignalStats};
