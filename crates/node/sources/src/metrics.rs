//! Metrics for the runtime configuration loader.

/// Container for metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of runtime config loads, labeled by result.
    pub const RUNTIME_CONFIG_LOADS: &str = "loam_sources_runtime_config_loads";

    /// Initializes metrics for the runtime config loader.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in [`loam_sources`][crate].
    #[cfg(feature = "metrics")]
    pub fn describe() {
        metrics::describe_counter!(
            Self::RUNTIME_CONFIG_LOADS,
            metrics::Unit::Count,
            "Runtime config loads from L1"
        );
    }

    /// Initializes metrics to `0` so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn zero() {
        loam_macros::set!(counter, Self::RUNTIME_CONFIG_LOADS, "result", "success", 0);
        loam_macros::set!(counter, Self::RUNTIME_CONFIG_LOADS, "result", "failure", 0);
    }
}
