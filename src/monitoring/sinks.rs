/*!
 * Event Sinks
 * Destinations for intersection events: tracing, console, memory, fan-out
 */

use super::events::{Severity, SignalEvent};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Receiver of ordered intersection events
///
/// Called from every road worker; implementations must be thread-safe and
/// must not reorder events emitted by one thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &SignalEvent);
}

/// Logs every event through `tracing` with structured fields
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &SignalEvent) {
        let road = event.road().map(|r| r.name()).unwrap_or("-");
        match event.severity() {
            Severity::Debug => debug!(road, "{}", event),
            Severity::Info => info!(road, "{}", event),
        }
    }
}

/// Writes each event as one line on stdout
///
/// Each event is written under the stdout lock so output from concurrent
/// workers never interleaves mid-line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: &SignalEvent) {
        let mut out = std::io::stdout().lock();
        let result = match event {
            SignalEvent::Switching { .. } | SignalEvent::Started => writeln!(out, "{event}\n"),
            SignalEvent::Finished { .. } => writeln!(out, "\n{event}"),
            _ => writeln!(out, "{event}"),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to write event to stdout");
        }
    }
}

/// Records events in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SignalEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<SignalEvent> {
        self.events.lock().clone()
    }

    /// Rendered lines of everything recorded so far
    pub fn lines(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &SignalEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Forwards every event to each inner sink, in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: &SignalEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Road;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit(&SignalEvent::Started);
        sink.emit(&SignalEvent::Green {
            road: Road::North,
            cars: 2,
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.lines(),
            vec![
                "Starting Traffic Signal Simulation...".to_string(),
                "North signal GREEN - 2 cars passed.".to_string(),
            ]
        );
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let a = Arc::new(MemorySink::new());
        let b = Arc::new(MemorySink::new());
        let fanout = FanoutSink::new().with(a.clone()).with(b.clone());

        fanout.emit(&SignalEvent::Finished { total: 7 });

        assert_eq!(a.events(), vec![SignalEvent::Finished { total: 7 }]);
        assert_eq!(b.events(), a.events());
    }
}
