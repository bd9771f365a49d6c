/*!
 * Simulation Module
 * Configuration, orchestration and reporting of an intersection run
 */

mod config;
mod intersection;
mod report;

pub use config::SimulationConfig;
pub use intersection::{Intersection, RunningIntersection};
pub use report::SimulationReport;
