//! Logging facilities for the parallax layout.
//!
//! The crate emits through the `tracing` crate and never installs a
//! subscriber. Install one in the application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_parallax=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Geometry engine target (one event per layout pass).
    pub const ENGINE: &str = "horizon_lattice_parallax::engine";
    /// Stateful layout facade target.
    pub const LAYOUT: &str = "horizon_lattice_parallax::layout";
    /// Configuration loading and mutation target.
    pub const CONFIG: &str = "horizon_lattice_parallax::config";
    /// Invalidation bookkeeping target.
    pub const INVALIDATION: &str = "horizon_lattice_parallax::invalidation";
    /// Base flow layout target.
    pub const FLOW: &str = "horizon_lattice_parallax::flow";
    /// Performance spans.
    pub const PERF: &str = "horizon_lattice_parallax::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Wrap a layout pass in one of these to measure it with a timing-aware
/// subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
