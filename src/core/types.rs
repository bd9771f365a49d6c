/*!
 * Core Types
 * Road identity shared by the controller, workers and reports
 */

use super::errors::{SignalError, SignalResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of approach roads at the intersection
pub const ROAD_COUNT: usize = 4;

/// Approach road of the intersection
///
/// Declaration order is the signal's cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Road {
    North,
    East,
    South,
    West,
}

impl Road {
    /// All roads in cycling order
    pub const ALL: [Road; ROAD_COUNT] = [Road::North, Road::East, Road::South, Road::West];

    /// Road that holds green when a controller is created
    pub const FIRST: Road = Road::North;

    /// Position in the cycling order
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Road at `index` in the cycling order (wraps around)
    #[inline]
    pub const fn from_index(index: usize) -> Road {
        Self::ALL[index % ROAD_COUNT]
    }

    /// Successor in the cycling order (West wraps to North)
    #[inline]
    pub const fn next(self) -> Road {
        Self::from_index(self.index() + 1)
    }

    /// Every other road, in cycling order
    pub fn others(self) -> impl Iterator<Item = Road> {
        Self::ALL.into_iter().filter(move |road| *road != self)
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Road::North => "North",
            Road::East => "East",
            Road::South => "South",
            Road::West => "West",
        }
    }
}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Road {
    type Err = SignalError;

    fn from_str(s: &str) -> SignalResult<Self> {
        Road::ALL
            .into_iter()
            .find(|road| road.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SignalError::UnknownRoad(s.to_string()))
    }
}
