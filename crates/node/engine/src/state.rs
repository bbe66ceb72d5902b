//! The head triple tracked between reconciliations.

use alloy_rpc_types_engine::ForkchoiceState;
use loam_protocol::{L2BlockInfo, SyncStatus};
use serde::{Deserialize, Serialize};

use crate::{L2ForkchoiceState, Metrics};

/// The synchronization state of the execution layer across different safety levels.
///
/// Listed from least to most safe:
///
/// 1. **Unsafe** - Most recent blocks, not yet confirmed against L1
/// 2. **Pending-safe** - Derived from L1, but the span batch is not complete yet
/// 3. **Safe** - Derived from L1 data whose sequencing window is complete
/// 4. **Finalized** - Derived from finalized L1 data only
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineSyncState {
    /// Most recent block accepted locally (lowest safety level).
    unsafe_head: L2BlockInfo,
    /// Derived from L1 data, but not a completed span batch.
    pending_safe_head: L2BlockInfo,
    /// Derived from L1 data.
    safe_head: L2BlockInfo,
    /// Derived from finalized L1 data (highest safety level).
    finalized_head: L2BlockInfo,
}

impl EngineSyncState {
    /// Returns the current unsafe head.
    pub const fn unsafe_head(&self) -> L2BlockInfo {
        self.unsafe_head
    }

    /// Returns the current pending safe head.
    pub const fn pending_safe_head(&self) -> L2BlockInfo {
        self.pending_safe_head
    }

    /// Returns the current safe head.
    pub const fn safe_head(&self) -> L2BlockInfo {
        self.safe_head
    }

    /// Returns the current finalized head.
    pub const fn finalized_head(&self) -> L2BlockInfo {
        self.finalized_head
    }

    /// Creates a `ForkchoiceState`
    ///
    /// - `head_block` = `unsafe_head`
    /// - `safe_block` = `safe_head`
    /// - `finalized_block` = `finalized_head`
    ///
    /// If the block info is not yet available, the default values are used.
    pub const fn create_forkchoice_state(&self) -> ForkchoiceState {
        ForkchoiceState {
            head_block_hash: self.unsafe_head.hash(),
            safe_block_hash: self.safe_head.hash(),
            finalized_block_hash: self.finalized_head.hash(),
        }
    }

    /// Returns the unsafe, safe and finalized heads.
    pub const fn forkchoice(&self) -> L2ForkchoiceState {
        L2ForkchoiceState {
            un_safe: self.unsafe_head,
            safe: self.safe_head,
            finalized: self.finalized_head,
        }
    }

    /// Fills the L2 half of a [`SyncStatus`] whose L1 half the caller already knows.
    pub const fn sync_status(&self, l1: SyncStatus) -> SyncStatus {
        SyncStatus {
            unsafe_l2: self.unsafe_head,
            safe_l2: self.safe_head,
            finalized_l2: self.finalized_head,
            pending_safe_l2: self.pending_safe_head,
            ..l1
        }
    }

    /// Applies the update to the provided sync state, using the current state values if the update
    /// is not specified. Returns the new sync state.
    pub fn apply_update(self, sync_state_update: EngineSyncStateUpdate) -> Self {
        if let Some(unsafe_head) = sync_state_update.unsafe_head {
            Self::update_block_label_metric(
                Metrics::UNSAFE_BLOCK_LABEL,
                unsafe_head.block_info.number,
            );
        }
        if let Some(pending_safe_head) = sync_state_update.pending_safe_head {
            Self::update_block_label_metric(
                Metrics::PENDING_SAFE_BLOCK_LABEL,
                pending_safe_head.block_info.number,
            );
        }
        if let Some(safe_head) = sync_state_update.safe_head {
            Self::update_block_label_metric(Metrics::SAFE_BLOCK_LABEL, safe_head.block_info.number);
        }
        if let Some(finalized_head) = sync_state_update.finalized_head {
            Self::update_block_label_metric(
                Metrics::FINALIZED_BLOCK_LABEL,
                finalized_head.block_info.number,
            );
        }

        Self {
            unsafe_head: sync_state_update.unsafe_head.unwrap_or(self.unsafe_head),
            pending_safe_head: sync_state_update
                .pending_safe_head
                .unwrap_or(self.pending_safe_head),
            safe_head: sync_state_update.safe_head.unwrap_or(self.safe_head),
            finalized_head: sync_state_update.finalized_head.unwrap_or(self.finalized_head),
        }
    }

    /// Updates a block label metric, keyed by the label.
    #[cfg(feature = "metrics")]
    #[inline]
    fn update_block_label_metric(label: &'static str, number: u64) {
        loam_macros::set!(gauge, Metrics::BLOCK_LABELS, "label", label, number as f64);
    }

    /// Updates a block label metric, keyed by the label.
    #[cfg(not(feature = "metrics"))]
    #[inline]
    const fn update_block_label_metric(_label: &'static str, _number: u64) {}
}

/// A reconciled triple replaces every head; pending-safe restarts at safe.
impl From<L2ForkchoiceState> for EngineSyncStateUpdate {
    fn from(fc: L2ForkchoiceState) -> Self {
        Self {
            unsafe_head: Some(fc.un_safe),
            pending_safe_head: Some(fc.safe),
            safe_head: Some(fc.safe),
            finalized_head: Some(fc.finalized),
        }
    }
}

/// Specifies how to update the sync state of the engine.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSyncStateUpdate {
    /// Most recent block accepted locally
    pub unsafe_head: Option<L2BlockInfo>,
    /// Derived from L1, but not a completed span batch yet.
    pub pending_safe_head: Option<L2BlockInfo>,
    /// Derived from L1.
    pub safe_head: Option<L2BlockInfo>,
    /// Derived from finalized L1 data.
    pub finalized_head: Option<L2BlockInfo>,
}
