/*!
 * Road Module
 * Per-road workers and the draws that feed them
 */

mod draw;
mod worker;

pub use draw::{RandomDraw, ScriptedDraw, TrafficDraw};
pub use worker::{RoadSummary, RoadWorker, WorkerTiming};
