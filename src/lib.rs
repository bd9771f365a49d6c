/*!
 * Intersection Signal Library
 *
 * A four-way intersection: one shared signal cycles green among four roads
 * in fixed order while one worker thread per road waits for its turn,
 * passes vehicles, holds green and hands off.
 */

pub mod core;
pub mod monitoring;
pub mod road;
pub mod signals;
pub mod simulation;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{Road, ROAD_COUNT};
pub use monitoring::{
    init_tracing, ConsoleSink, EventSink, FanoutSink, MemorySink, SignalEvent, TracingSink,
};
pub use road::{RandomDraw, RoadSummary, RoadWorker, ScriptedDraw, TrafficDraw, WorkerTiming};
pub use signals::{GreenWait, HoldOutcome, SignalController, SignalStats};
pub use simulation::{Intersection, RunningIntersection, SimulationConfig, SimulationReport};
