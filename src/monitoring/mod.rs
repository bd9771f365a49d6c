/*!
 * Monitoring
 * Intersection events, their sinks, and tracing setup
 */

pub mod events;
mod sinks;
mod tracer;

pub use events::{Severity, SignalEvent};
pub use sinks::{ConsoleSink, EventSink, FanoutSink, MemorySink, TracingSink};
pub use tracer::{generate_run_id, init_tracing, span_road, span_run};
