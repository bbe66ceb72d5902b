//! Metrics for the derivation stages.

/// Container for metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of channel stage swaps, labeled by the stage swapped in.
    pub const CHANNEL_STAGE_TRANSITIONS: &str = "loam_derive_channel_stage_transitions";

    /// Identifier for the gauge that tracks the total size of buffered channels.
    pub const CHANNEL_BANK_SIZE: &str = "loam_derive_channel_bank_size";

    /// Identifier for the counter of channels dropped, labeled by reason.
    pub const CHANNELS_DROPPED: &str = "loam_derive_channels_dropped";

    /// Identifier for the counter of channels read out of the channel stages.
    pub const CHANNELS_READ: &str = "loam_derive_channels_read";

    /// Identifier for the counter of payload attributes prepared.
    pub const ATTRIBUTES_PREPARED: &str = "loam_derive_attributes_prepared";

    /// Identifier for the counter of network upgrade transaction batches injected, by fork.
    pub const UPGRADE_TXS_INJECTED: &str = "loam_derive_upgrade_txs_injected";

    /// Identifier for the counter of timestamps clamped to the wall clock.
    pub const TIMESTAMPS_CLAMPED: &str = "loam_derive_timestamps_clamped";

    /// Initializes metrics for the derivation stages.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in [`loam_derive`][crate].
    #[cfg(feature = "metrics")]
    pub fn describe() {
        metrics::describe_counter!(
            Self::CHANNEL_STAGE_TRANSITIONS,
            "Number of times the channel provider swapped its active stage"
        );
        metrics::describe_gauge!(Self::CHANNEL_BANK_SIZE, "Total size of channels in the bank");
        metrics::describe_counter!(Self::CHANNELS_DROPPED, "Number of channels dropped");
        metrics::describe_counter!(Self::CHANNELS_READ, "Number of complete channels read");
        metrics::describe_counter!(
            Self::ATTRIBUTES_PREPARED,
            "Number of payload attribute templates prepared"
        );
        metrics::describe_counter!(
            Self::UPGRADE_TXS_INJECTED,
            "Number of fork activation blocks that received upgrade transactions"
        );
        metrics::describe_counter!(
            Self::TIMESTAMPS_CLAMPED,
            "Number of sequenced block timestamps clamped to the wall clock"
        );
    }

    /// Initializes metrics to `0` so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn zero() {
        loam_macros::set!(counter, Self::CHANNEL_STAGE_TRANSITIONS, "stage", "bank", 0);
        loam_macros::set!(counter, Self::CHANNEL_STAGE_TRANSITIONS, "stage", "assembler", 0);
        loam_macros::set!(gauge, Self::CHANNEL_BANK_SIZE, 0);

        loam_macros::set!(counter, Self::CHANNELS_DROPPED, "reason", "timeout", 0);
        loam_macros::set!(counter, Self::CHANNELS_DROPPED, "reason", "pruned", 0);
        loam_macros::set!(counter, Self::CHANNELS_DROPPED, "reason", "too_large", 0);
        loam_macros::set!(counter, Self::CHANNELS_DROPPED, "reason", "replaced", 0);
        loam_macros::set!(counter, Self::CHANNELS_READ, 0);

        loam_macros::set!(counter, Self::ATTRIBUTES_PREPARED, 0);
        loam_macros::set!(counter, Self::UPGRADE_TXS_INJECTED, "fork", "ecotone", 0);
        loam_macros::set!(counter, Self::UPGRADE_TXS_INJECTED, "fork", "fjord", 0);
        loam_macros::set!(counter, Self::UPGRADE_TXS_INJECTED, "fork", "isthmus", 0);
        loam_macros::set!(counter, Self::TIMESTAMPS_CLAMPED, 0);
    }
}
