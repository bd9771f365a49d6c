/*!
 * Intersection Orchestrator
 *
 * Creates the shared signal, spawns one named OS thread per road, and on
 * shutdown stops the signal, joins every worker and only then sums totals.
 */

use super::config::SimulationConfig;
use super::report::SimulationReport;
use crate::core::errors::{SimulationError, SimulationResult};
use crate::core::limits::{WORKER_STACK_SIZE, WORKER_THREAD_PREFIX};
use crate::core::types::Road;
use crate::monitoring::{generate_run_id, span_run, EventSink, SignalEvent};
use crate::road::{RoadSummary, RoadWorker, TrafficDraw};
use crate::signals::SignalController;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{error, info, warn, Span};
use uuid::Uuid;

type DrawFactory = Box<dyn FnMut(Road) -> Box<dyn TrafficDraw>>;

/// A configured, not yet running intersection
pub struct Intersection {
    config: SimulationConfig,
    controller: Arc<SignalController>,
    sink: Arc<dyn EventSink>,
    draws: Option<DrawFactory>,
}

impl Intersection {
    /// Validate `config` and create the shared signal
    pub fn new(config: SimulationConfig, sink: Arc<dyn EventSink>) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            controller: Arc::new(SignalController::new()),
            sink,
            draws: None,
        })
    }

    /// Override where each road's draws come from
    pub fn with_draws<F>(mut self, factory: F) -> Self
    where
        F: FnMut(Road) -> Box<dyn TrafficDraw> + 'static,
    {
        self.draws = Some(Box::new(factory));
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn controller(&self) -> &Arc<SignalController> {
        &self.controller
    }

    /// Spawn one worker per road
    ///
    /// If a spawn fails, workers already running are stopped and joined
    /// before the error is returned.
    pub fn start(mut self) -> SimulationResult<RunningIntersection> {
        let run_id = generate_run_id();
        let span = span_run(run_id);
        let _enter = span.enter();

        info!(
            run_ms = self.config.run_duration().as_millis() as u64,
            seed = ?self.config.seed,
            "Starting intersection"
        );
        self.sink.emit(&SignalEvent::Started);

        let timing = self.config.worker_timing();
        let mut running = RunningIntersection {
            run_id,
            controller: self.controller.clone(),
            sink: self.sink.clone(),
            workers: Vec::with_capacity(Road::ALL.len()),
            started: Instant::now(),
            span: span.clone(),
        };

        for road in Road::ALL {
            let draw = match self.draws.as_mut() {
                Some(factory) => factory(road),
                None => self.config.draw_for(road),
            };
            let worker = RoadWorker::new(
                road,
                self.controller.clone(),
                draw,
                self.sink.clone(),
                timing.clone(),
            );
            let worker_span = span.clone();

            let spawned = thread::Builder::new()
                .name(format!(
                    "{}{}",
                    WORKER_THREAD_PREFIX,
                    road.name().to_ascii_lowercase()
                ))
                .stack_size(WORKER_STACK_SIZE)
                .spawn(move || {
                    let _enter = worker_span.enter();
                    worker.run()
                });

            match spawned {
                Ok(handle) => running.workers.push((road, handle)),
                Err(source) => {
                    error!(road = %road, error = %source, "Failed to spawn road worker");
                    running.stop();
                    // Already failing; join errors would only mask the spawn error
                    let _ = running.join();
                    return Err(SimulationError::Spawn { road, source });
                }
            }
        }

        Ok(running)
    }

    /// Run for the configured duration, then stop and report
    pub fn run(self) -> SimulationResult<SimulationReport> {
        let duration = self.config.run_duration();
        self.start()?.run_for(duration)
    }
}

/// Handle to a running intersection
///
/// Dropping the handle without joining stops the signal so workers exit;
/// their threads are then detached.
pub struct RunningIntersection {
    run_id: Uuid,
    controller: Arc<SignalController>,
    sink: Arc<dyn EventSink>,
    workers: Vec<(Road, JoinHandle<RoadSummary>)>,
    started: Instant,
    span: Span,
}

impl RunningIntersection {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn controller(&self) -> &Arc<SignalController> {
        &self.controller
    }

    /// Signal every worker to finish its current step and exit
    pub fn stop(&self) {
        self.controller.stop();
    }

    /// Wait for every worker, then total their counts
    ///
    /// Blocks until the workers exit; call `stop` first (or use `shutdown`).
    /// Every worker is joined even when one of them panicked.
    pub fn join(mut self) -> SimulationResult<SimulationReport> {
        let _enter = self.span.clone().entered();
        let workers = std::mem::take(&mut self.workers);

        let mut summaries = Vec::with_capacity(workers.len());
        let mut failure = None;
        for (road, handle) in workers {
            match handle.join() {
                Ok(summary) => summaries.push(summary),
                Err(_) => {
                    warn!(road = %road, "Road worker panicked");
                    if failure.is_none() {
                        failure = Some(SimulationError::WorkerPanicked(road));
                    }
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        let report = SimulationReport::new(
            self.run_id,
            summaries,
            self.controller.stats().advances,
            self.started.elapsed().as_millis() as u64,
        );
        self.sink.emit(&SignalEvent::Finished {
            total: report.total_cars,
        });
        info!(
            total = report.total_cars,
            advances = report.advances,
            elapsed_ms = report.elapsed_ms,
            "Intersection stopped"
        );
        Ok(report)
    }

    /// Stop, then join
    pub fn shutdown(self) -> SimulationResult<SimulationReport> {
        self.stop();
        self.join()
    }

    /// Let the intersection run for `duration`, then shut it down
    pub fn run_for(self, duration: Duration) -> SimulationResult<SimulationReport> {
        thread::sleep(duration);
        self.shutdown()
    }
}

impl Drop for RunningIntersection {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.controller.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::MemorySink;

    fn fast_config() -> SimulationConfig {
        SimulationConfig::default()
            .with_time_unit(Duration::from_millis(1))
            .with_run_units(40)
            .with_seed(3)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = fast_config().with_hold(4, 1);
        let result = Intersection::new(config, Arc::new(MemorySink::new()));
        assert!(matches!(result, Err(SimulationError::Config(_))));
    }

    #[test]
    fn test_run_reports_every_road() {
        let sink = Arc::new(MemorySink::new());
        let report = Intersection::new(fast_config(), sink.clone())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(report.roads.len(), Road::ALL.len());
        assert_eq!(
            report.total_cars,
            report.roads.iter().map(|s| s.cars_passed).sum::<u64>()
        );

        let events = sink.events();
        assert_eq!(events.first(), Some(&SignalEvent::Started));
        assert_eq!(
            events.last(),
            Some(&SignalEvent::Finished {
                total: report.total_cars
            })
        );
    }

    #[test]
    fn test_drop_stops_signal() {
        let intersection = Intersection::new(fast_config(), Arc::new(MemorySink::new())).unwrap();
        let controller = intersection.controller().clone();
        let running = intersection.start().unwrap();
        drop(running);
        assert!(controller.is_stopped());
    }
}
