//! Metrics for the RPC servers.

/// Container for metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the gauge that counts RPC calls, labeled by method.
    pub const RPC_CALLS: &str = "loam_rpc_calls";

    /// Initializes metrics for the RPC servers.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in [`loam_rpc`][crate].
    #[cfg(feature = "metrics")]
    pub fn describe() {
        metrics::describe_gauge!(Self::RPC_CALLS, "Number of RPC calls by method");
    }

    /// Initializes metrics to `0` so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn zero() {
        for method in [
            "optimism_syncStatus",
            "optimism_rollupConfig",
            "optimism_blockRefWithStatus",
            "admin_resetDerivationPipeline",
            "admin_startSequencer",
            "admin_stopSequencer",
            "admin_sequencerActive",
            "admin_overrideLeader",
        ] {
            loam_macros::set!(gauge, Self::RPC_CALLS, "method", method, 0);
        }
    }
}
