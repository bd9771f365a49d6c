/*!
 * Road Worker
 *
 * Drives one road's green-light cycle until the signal is stopped:
 * wait for green, pass a batch of vehicles, hold green, hand off.
 *
 * The vehicle count is owned by the worker and only leaves it through the
 * `RoadSummary` returned from `run`, so the orchestrator can read it only
 * after joining the worker's thread.
 */

use super::draw::TrafficDraw;
use crate::core::limits::{
    DEFAULT_HOLD_MAX_UNITS, DEFAULT_HOLD_MIN_UNITS, DEFAULT_TIME_UNIT, DEFAULT_VEHICLES_MAX,
    DEFAULT_VEHICLES_MIN,
};
use crate::core::types::Road;
use crate::monitoring::{span_road, EventSink, SignalEvent};
use crate::signals::{GreenWait, HoldOutcome, SignalController};
use serde::{Deserialize, Serialize};
use std::ops::{ControlFlow, RangeInclusive};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Draw ranges and time scale for a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerTiming {
    /// Vehicles passing per green cycle
    pub vehicles: RangeInclusive<u64>,
    /// Green hold, in time units
    pub hold_units: RangeInclusive<u64>,
    /// Length of one time unit
    pub time_unit: Duration,
}

impl WorkerTiming {
    /// Hold duration for `units` time units
    pub fn hold_duration(&self, units: u64) -> Duration {
        self.time_unit
            .saturating_mul(u32::try_from(units).unwrap_or(u32::MAX))
    }
}

impl Default for WorkerTiming {
    fn default() -> Self {
        Self {
            vehicles: DEFAULT_VEHICLES_MIN..=DEFAULT_VEHICLES_MAX,
            hold_units: DEFAULT_HOLD_MIN_UNITS..=DEFAULT_HOLD_MAX_UNITS,
            time_unit: DEFAULT_TIME_UNIT,
        }
    }
}

/// Final tally of one road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadSummary {
    pub road: Road,
    /// Vehicles passed over the whole run
    pub cars_passed: u64,
    /// Green cycles entered (one vehicle draw each)
    pub green_cycles: u64,
    /// Times this road handed green to the next one
    pub handoffs: u64,
}

/// One road's lifecycle
pub struct RoadWorker {
    road: Road,
    controller: Arc<SignalController>,
    draw: Box<dyn TrafficDraw>,
    sink: Arc<dyn EventSink>,
    timing: WorkerTiming,
    cars_passed: u64,
    green_cycles: u64,
    handoffs: u64,
}

impl RoadWorker {
    pub fn new(
        road: Road,
        controller: Arc<SignalController>,
        draw: Box<dyn TrafficDraw>,
        sink: Arc<dyn EventSink>,
        timing: WorkerTiming,
    ) -> Self {
        Self {
            road,
            controller,
            draw,
            sink,
            timing,
            cars_passed: 0,
            green_cycles: 0,
            handoffs: 0,
        }
    }

    pub fn road(&self) -> Road {
        self.road
    }

    pub fn cars_passed(&self) -> u64 {
        self.cars_passed
    }

    /// Run green cycles until the controller is stopped
    ///
    /// Emits `RoadStopped` exactly once on the way out.
    pub fn run(mut self) -> RoadSummary {
        let span = span_road(self.road.name());
        let _enter = span.enter();
        debug!("Road worker started");

        while !self.controller.is_stopped() {
            if self.cycle().is_break() {
                break;
            }
        }

        let summary = self.summary();
        self.sink.emit(&SignalEvent::RoadStopped {
            road: self.road,
            total: summary.cars_passed,
        });
        info!(
            cars = summary.cars_passed,
            cycles = summary.green_cycles,
            handoffs = summary.handoffs,
            "Road worker stopped"
        );
        summary
    }

    /// One green cycle; `Break` means the worker must exit
    fn cycle(&mut self) -> ControlFlow<()> {
        match self.controller.wait_for_green(self.road) {
            GreenWait::Granted => {}
            GreenWait::Stopped | GreenWait::TimedOut => return ControlFlow::Break(()),
        }

        // A stop can land between the grant and here; never process a stale grant
        if self.controller.is_stopped() {
            return ControlFlow::Break(());
        }

        let cars = self.draw.draw(self.timing.vehicles.clone());
        self.cars_passed += cars;
        self.green_cycles += 1;

        self.sink.emit(&SignalEvent::Green {
            road: self.road,
            cars,
        });
        for road in self.road.others() {
            self.sink.emit(&SignalEvent::Red { road });
        }

        let units = self.draw.draw(self.timing.hold_units.clone());
        let hold = self.timing.hold_duration(units);
        debug!(cars, hold_ms = hold.as_millis() as u64, "Holding green");

        if self.controller.hold(hold) == HoldOutcome::Interrupted {
            return ControlFlow::Break(());
        }

        if let Some(next) = self.controller.advance_if_green(self.road) {
            self.handoffs += 1;
            self.sink.emit(&SignalEvent::Switching {
                from: self.road,
                to: next,
            });
        }

        ControlFlow::Continue(())
    }

    fn summary(&self) -> RoadSummary {
        RoadSummary {
            road: self.road,
            cars_passed: self.cars_passed,
            green_cycles: self.green_cycles,
            handoffs: self.handoffs,
        }
    }
}
