/*!
 * Event System
 * Strongly-typed intersection events, rendered as the human-readable lines
 * the simulation reports
 */

use crate::core::types::Road;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event severity for filtering sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
}

/// Everything a run reports, in the order it happens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SignalEvent {
    /// Simulation is about to spawn its workers
    Started,
    /// A road took green and let `cars` vehicles through
    Green { road: Road, cars: u64 },
    /// A road is red while another holds green
    Red { road: Road },
    /// A road handed green to the next one
    Switching { from: Road, to: Road },
    /// A road worker exited
    RoadStopped { road: Road, total: u64 },
    /// All workers joined
    Finished { total: u64 },
}

impl SignalEvent {
    /// Road the event is about, if any
    pub fn road(&self) -> Option<Road> {
        match self {
            SignalEvent::Green { road, .. }
            | SignalEvent::Red { road }
            | SignalEvent::RoadStopped { road, .. } => Some(*road),
            SignalEvent::Switching { from, .. } => Some(*from),
            SignalEvent::Started | SignalEvent::Finished { .. } => None,
        }
    }

    /// Red notices are chatty; everything else is informational
    pub fn severity(&self) -> Severity {
        match self {
            SignalEvent::Red { .. } => Severity::Debug,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalEvent::Started => write!(f, "Starting Traffic Signal Simulation..."),
            SignalEvent::Green { road, cars } => {
                write!(f, "{road} signal GREEN - {cars} cars passed.")
            }
            SignalEvent::Red { road } => write!(f, "{road} signal RED - cars waiting..."),
            SignalEvent::Switching { .. } => write!(f, "Switching signal..."),
            SignalEvent::RoadStopped { road, total } => {
                write!(f, "{road} road stopped. Total cars passed: {total}")
            }
            SignalEvent::Finished { total } => {
                write!(f, "Simulation Ended. Total cars passed: {total}")
            }
        }
    }
}
