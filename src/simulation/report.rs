/*!
 * Simulation Report
 * Per-road and aggregate totals, read only after every worker has joined
 */

use crate::core::types::Road;
use crate::road::RoadSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Totals of one finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    /// One entry per road, in cycling order
    pub roads: Vec<RoadSummary>,
    /// Sum of every road's `cars_passed`
    pub total_cars: u64,
    /// Signal transitions over the run
    pub advances: u64,
    /// Wall-clock length of the run, in milliseconds
    pub elapsed_ms: u64,
}

impl SimulationReport {
    pub fn new(run_id: Uuid, mut roads: Vec<RoadSummary>, advances: u64, elapsed_ms: u64) -> Self {
        roads.sort_by_key(|summary| summary.road.index());
        let total_cars = roads.iter().map(|summary| summary.cars_passed).sum();
        Self {
            run_id,
            roads,
            total_cars,
            advances,
            elapsed_ms,
        }
    }

    /// Summary for one road
    pub fn road(&self, road: Road) -> Option<&RoadSummary> {
        self.roads.iter().find(|summary| summary.road == road)
    }

    /// Green cycles entered across all roads
    pub fn green_cycles(&self) -> u64 {
        self.roads.iter().map(|summary| summary.green_cycles).sum()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.roads {
            writeln!(
                f,
                "{:<6} {:>5} cars in {:>3} green cycles",
                summary.road, summary.cars_passed, summary.green_cycles
            )?;
        }
        write!(f, "Total cars passed: {}", self.total_cars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(road: Road, cars_passed: u64) -> RoadSummary {
        RoadSummary {
            road,
            cars_passed,
            green_cycles: 1,
            handoffs: 1,
        }
    }

    #[test]
    fn test_totals_and_order() {
        let report = SimulationReport::new(
            Uuid::nil(),
            vec![summary(Road::West, 4), summary(Road::North, 3)],
            2,
            10,
        );

        assert_eq!(report.total_cars, 7);
        assert_eq!(report.roads[0].road, Road::North);
        assert_eq!(report.road(Road::West).map(|s| s.cars_passed), Some(4));
        assert_eq!(report.road(Road::East), None);
        assert_eq!(report.green_cycles(), 2);
    }

    #[test]
    fn test_display() {
        let report = SimulationReport::new(Uuid::nil(), vec![summary(Road::North, 3)], 1, 5);
        assert_eq!(
            report.to_string(),
            "North      3 cars in   1 green cycles\nTotal cars passed: 3"
        );
    }
}
