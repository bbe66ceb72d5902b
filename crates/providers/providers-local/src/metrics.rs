//! Metrics for the local buffered providers.

/// Container for metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the gauge that tracks buffered provider cache hits.
    pub const CACHE_HITS: &str = "loam_providers_local_cache_hits";

    /// Identifier for the gauge that tracks buffered provider cache misses.
    pub const CACHE_MISSES: &str = "loam_providers_local_cache_misses";

    /// Identifier for the gauge that tracks chain events processed.
    pub const CHAIN_EVENTS_PROCESSED: &str = "loam_providers_local_chain_events";

    /// Identifier for the gauge that tracks chain event errors.
    pub const CHAIN_EVENT_ERRORS: &str = "loam_providers_local_chain_event_errors";

    /// Identifier for the gauge that tracks blocks added to cache.
    pub const BLOCKS_ADDED: &str = "loam_providers_local_blocks_added";

    /// Identifier for the gauge that tracks active cache entries.
    pub const CACHE_ENTRIES: &str = "loam_providers_local_cache_entries";

    /// Identifier for the gauge that tracks the depth of the last reorg.
    pub const REORG_DEPTH: &str = "loam_providers_local_reorg_depth";

    /// Identifier for the gauge that tracks cache clears.
    pub const CACHE_CLEARS: &str = "loam_providers_local_cache_clears";

    /// Initializes metrics for the local buffered providers.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in [`loam_providers_local`][crate].
    #[cfg(feature = "metrics")]
    pub fn describe() {
        metrics::describe_gauge!(Self::CACHE_HITS, "Number of cache hits in buffered providers");
        metrics::describe_gauge!(
            Self::CACHE_MISSES,
            "Number of cache misses in buffered providers"
        );
        metrics::describe_gauge!(Self::CHAIN_EVENTS_PROCESSED, "Number of chain events processed");
        metrics::describe_gauge!(Self::CHAIN_EVENT_ERRORS, "Number of rejected chain events");
        metrics::describe_gauge!(Self::BLOCKS_ADDED, "Number of blocks added to cache");
        metrics::describe_gauge!(Self::CACHE_ENTRIES, "Number of active entries in cache");
        metrics::describe_gauge!(Self::REORG_DEPTH, "Depth of the last handled reorg");
        metrics::describe_gauge!(Self::CACHE_CLEARS, "Number of times cache was cleared");
    }

    /// Initializes metrics to `0` so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn zero() {
        const METHODS: [&str; 6] = [
            "block_info_by_number",
            "block_info_by_hash",
            "block_info_by_label",
            "block_by_number",
            "l2_block_info",
            "system_config",
        ];
        for method in METHODS {
            loam_macros::set!(gauge, Self::CACHE_HITS, "method", method, 0);
            loam_macros::set!(gauge, Self::CACHE_MISSES, "method", method, 0);
        }

        for event in ["committed", "reorged", "reverted"] {
            loam_macros::set!(gauge, Self::CHAIN_EVENTS_PROCESSED, "event", event, 0);
            loam_macros::set!(gauge, Self::CHAIN_EVENT_ERRORS, "event", event, 0);
        }

        loam_macros::set!(gauge, Self::BLOCKS_ADDED, "chain", "l1", 0);
        loam_macros::set!(gauge, Self::BLOCKS_ADDED, "chain", "l2", 0);
        loam_macros::set!(gauge, Self::CACHE_ENTRIES, "cache", "blocks_by_hash", 0);
        loam_macros::set!(gauge, Self::REORG_DEPTH, 0);
        loam_macros::set!(gauge, Self::CACHE_CLEARS, 0);
    }
}
