//! Logging facilities for Horizon Tabular.
//!
//! Horizon Tabular uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_tabular=debug")
//!         .init();
//! }
//! ```
//!
//! Pipeline recomputations run inside a [`PerfSpan`], so a subscriber with
//! span timing enabled shows how long filtering and sorting take.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_tabular_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_tabular_core::signal";
    /// Property and memo target.
    pub const PROPERTY: &str = "horizon_tabular_core::property";
    /// View engine target.
    pub const VIEW: &str = "horizon_tabular::view";
    /// Filter stage target.
    pub const FILTER: &str = "horizon_tabular::filter";
    /// Sort stage target.
    pub const SORT: &str = "horizon_tabular::sort";
    /// Selection tracker target.
    pub const SELECTION: &str = "horizon_tabular::selection";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_tabular::config";
    /// Performance spans target.
    pub const PERF: &str = "horizon_tabular::perf";
}

/// A guard for performance tracing spans.
///
/// Creates a tracing span that is entered on construction and exited when the
/// guard is dropped.
///
/// # Example
///
/// ```
/// use horizon_tabular_core::PerfSpan;
///
/// fn recompute() {
///     let _span = PerfSpan::new("recompute");
///     // ... work ...
/// } // Span automatically ends here
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_tabular::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}
