/*!
 * Intersection Signal - Main Entry Point
 *
 * Runs the four-way intersection for the configured duration (30 s by
 * default), then prints per-road and aggregate totals.
 */

use intersection_signal::{init_tracing, ConsoleSink, Intersection, SimulationConfig};
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    // Initialize structured tracing
    init_tracing();

    let config = SimulationConfig::from_env()?;
    info!(?config, "Configuration loaded");

    let report = Intersection::new(config, Arc::new(ConsoleSink::new()))?.run()?;

    let as_json = std::env::var("INTERSECTION_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else {
        println!("{report}");
    }

    Ok(())
}
