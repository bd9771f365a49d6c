/*!
 * Simulation Configuration
 *
 * Run length, draw ranges and time scale. Loaded from `INTERSECTION_*`
 * environment variables by the binary; constructed directly by tests.
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{
    DEFAULT_HOLD_MAX_UNITS, DEFAULT_HOLD_MIN_UNITS, DEFAULT_RUN_UNITS, DEFAULT_TIME_UNIT,
    DEFAULT_VEHICLES_MAX, DEFAULT_VEHICLES_MIN,
};
use crate::core::types::Road;
use crate::road::{RandomDraw, TrafficDraw, WorkerTiming};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Run length, in time units
    pub run_units: u64,
    /// Shortest green hold, in time units
    pub hold_min: u64,
    /// Longest green hold, in time units (inclusive)
    pub hold_max: u64,
    /// Fewest vehicles per green cycle
    pub vehicles_min: u64,
    /// Most vehicles per green cycle (inclusive)
    pub vehicles_max: u64,
    /// Length of one time unit, in milliseconds
    pub time_unit_ms: u64,
    /// Seed for reproducible draws; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            run_units: DEFAULT_RUN_UNITS,
            hold_min: DEFAULT_HOLD_MIN_UNITS,
            hold_max: DEFAULT_HOLD_MAX_UNITS,
            vehicles_min: DEFAULT_VEHICLES_MIN,
            vehicles_max: DEFAULT_VEHICLES_MAX,
            time_unit_ms: DEFAULT_TIME_UNIT.as_millis() as u64,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load overrides from the process environment
    ///
    /// Environment variables (all optional, non-negative integers):
    /// - INTERSECTION_RUN_UNITS
    /// - INTERSECTION_HOLD_MIN / INTERSECTION_HOLD_MAX
    /// - INTERSECTION_VEHICLES_MIN / INTERSECTION_VEHICLES_MAX
    /// - INTERSECTION_TIME_UNIT_MS
    /// - INTERSECTION_SEED
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load overrides through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &str| -> ConfigResult<Option<u64>> {
            match lookup(var) {
                None => Ok(None),
                Some(value) => value.trim().parse().map(Some).map_err(|_| {
                    ConfigError::InvalidEnv {
                        var: var.to_string(),
                        value,
                    }
                }),
            }
        };

        let mut config = Self::default();
        if let Some(v) = read("INTERSECTION_RUN_UNITS")? {
            config.run_units = v;
        }
        if let Some(v) = read("INTERSECTION_HOLD_MIN")? {
            config.hold_min = v;
        }
        if let Some(v) = read("INTERSECTION_HOLD_MAX")? {
            config.hold_max = v;
        }
        if let Some(v) = read("INTERSECTION_VEHICLES_MIN")? {
            config.vehicles_min = v;
        }
        if let Some(v) = read("INTERSECTION_VEHICLES_MAX")? {
            config.vehicles_max = v;
        }
        if let Some(v) = read("INTERSECTION_TIME_UNIT_MS")? {
            config.time_unit_ms = v;
        }
        config.seed = read("INTERSECTION_SEED")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject ranges and scales the workers cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.time_unit_ms == 0 {
            return Err(ConfigError::ZeroTimeUnit);
        }
        if self.hold_min > self.hold_max {
            return Err(ConfigError::InvalidRange {
                name: "hold".into(),
                min: self.hold_min,
                max: self.hold_max,
            });
        }
        if self.hold_min == 0 {
            return Err(ConfigError::ZeroHold);
        }
        if self.vehicles_min > self.vehicles_max {
            return Err(ConfigError::InvalidRange {
                name: "vehicles".into(),
                min: self.vehicles_min,
                max: self.vehicles_max,
            });
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_unit(mut self, unit: Duration) -> Self {
        self.time_unit_ms = unit.as_millis() as u64;
        self
    }

    pub fn with_run_units(mut self, units: u64) -> Self {
        self.run_units = units;
        self
    }

    pub fn with_hold(mut self, min: u64, max: u64) -> Self {
        self.hold_min = min;
        self.hold_max = max;
        self
    }

    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    /// Wall-clock length of a run
    pub fn run_duration(&self) -> Duration {
        self.time_unit()
            .saturating_mul(u32::try_from(self.run_units).unwrap_or(u32::MAX))
    }

    /// Per-worker draw ranges and time scale
    pub fn worker_timing(&self) -> WorkerTiming {
        WorkerTiming {
            vehicles: self.vehicles_min..=self.vehicles_max,
            hold_units: self.hold_min..=self.hold_max,
            time_unit: self.time_unit(),
        }
    }

    /// Draw source for one road
    ///
    /// Seeded runs give each road its own stream derived from the seed.
    pub fn draw_for(&self, road: Road) -> Box<dyn TrafficDraw> {
        match self.seed {
            Some(seed) => Box::new(RandomDraw::seeded(seed.wrapping_add(road.index() as u64))),
            None => Box::new(RandomDraw::from_entropy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run_duration(), Duration::from_secs(30));
        let timing = config.worker_timing();
        assert_eq!(timing.vehicles, 1..=5);
        assert_eq!(timing.hold_units, 2..=5);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = SimulationConfig::from_lookup(lookup(&[
            ("INTERSECTION_RUN_UNITS", "10"),
            ("INTERSECTION_TIME_UNIT_MS", "5"),
            ("INTERSECTION_SEED", " 99 "),
        ]))
        .unwrap();

        assert_eq!(config.run_units, 10);
        assert_eq!(config.run_duration(), Duration::from_millis(50));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.hold_min, DEFAULT_HOLD_MIN_UNITS);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = SimulationConfig::from_lookup(lookup(&[("INTERSECTION_HOLD_MAX", "five")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: "INTERSECTION_HOLD_MAX".into(),
                value: "five".into()
            }
        );
    }

    #[test]
    fn test_validate_ranges() {
        let inverted = SimulationConfig::default().with_hold(5, 2);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidRange { ref name, .. }) if name == "hold"
        ));

        let zero_hold = SimulationConfig::default().with_hold(0, 3);
        assert_eq!(zero_hold.validate(), Err(ConfigError::ZeroHold));

        let zero_unit = SimulationConfig::default().with_time_unit(Duration::ZERO);
        assert_eq!(zero_unit.validate(), Err(ConfigError::ZeroTimeUnit));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SimulationConfig = serde_json::from_str(r#"{"run_units": 3}"#).unwrap();
        assert_eq!(config.run_units, 3);
        assert_eq!(config.vehicles_max, DEFAULT_VEHICLES_MAX);
    }
}
