/*!
 * Tracing Setup
 * Structured logging for the simulation using the tracing crate
 *
 * Features:
 * - Run ID generation for correlating a run's log lines
 * - JSON-formatted logs for structured parsing
 * - Thread names in every line (`road-north`, ...)
 * - Logs go to stderr so stdout carries only the event lines and report
 */

use tracing::{info, info_span, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - INTERSECTION_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("INTERSECTION_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique ID for one simulation run
pub fn generate_run_id() -> Uuid {
    Uuid::new_v4()
}

/// Span covering one simulation run
pub fn span_run(run_id: Uuid) -> Span {
    info_span!("run", run_id = %run_id)
}

/// Span covering one road worker's lifetime
pub fn span_road(road: &str) -> Span {
    info_span!("road", road)
}
