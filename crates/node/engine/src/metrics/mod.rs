//! Metrics for head reconciliation and the engine sync state.

/// Container for the metric identifiers of [`loam_engine`][crate].
///
/// Recording is compiled in only with the `metrics` feature.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the gauge that tracks block labels.
    pub const BLOCK_LABELS: &str = "loam_node_block_labels";
    /// Unsafe block label.
    pub const UNSAFE_BLOCK_LABEL: &str = "unsafe";
    /// Pending-safe block label.
    pub const PENDING_SAFE_BLOCK_LABEL: &str = "pending-safe";
    /// Safe block label.
    pub const SAFE_BLOCK_LABEL: &str = "safe";
    /// Finalized block label.
    pub const FINALIZED_BLOCK_LABEL: &str = "finalized";

    /// Identifier for the counter of sync start runs, labeled by forkchoice outcome.
    pub const SYNC_START_OUTCOMES: &str = "loam_node_sync_start_outcomes";

    /// Identifier for the gauge of L2 blocks walked by the last sync start run.
    pub const SYNC_START_BLOCKS_WALKED: &str = "loam_node_sync_start_blocks_walked";

    /// Initializes metrics for the engine.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in [`loam_engine`][crate].
    #[cfg(feature = "metrics")]
    pub fn describe() {
        // Block labels
        metrics::describe_gauge!(Self::BLOCK_LABELS, "Blockchain head labels");

        // Sync start
        metrics::describe_counter!(
            Self::SYNC_START_OUTCOMES,
            metrics::Unit::Count,
            "Sync start runs by forkchoice outcome"
        );
        metrics::describe_gauge!(
            Self::SYNC_START_BLOCKS_WALKED,
            "L2 blocks walked by the last sync start run"
        );
    }

    /// Initializes metrics to `0` so they can be queried immediately by consumers of prometheus
    /// metrics.
    #[cfg(feature = "metrics")]
    pub fn zero() {
        loam_macros::set!(counter, Self::SYNC_START_OUTCOMES, "outcome", "traverse", 0);
        loam_macros::set!(counter, Self::SYNC_START_OUTCOMES, "outcome", "finality_less_sync", 0);
        loam_macros::set!(counter, Self::SYNC_START_OUTCOMES, "outcome", "corrupt_forkchoice", 0);
        loam_macros::set!(gauge, Self::SYNC_START_BLOCKS_WALKED, 0.0);
    }
}
