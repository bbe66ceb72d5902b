//! Common sync types

use crate::{BlockInfo, L2BlockInfo};

/// A snapshot of a rollup node's sync progress.
///
/// Fields that have not been derived yet are zeroed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub struct SyncStatus {
    /// The L1 block derivation last idled at.
    ///
    /// Safe L2 blocks were derived from L1 up to but excluding this block.
    pub current_l1: BlockInfo,
    /// Deprecated; always equal to `finalized_l1`.
    pub current_l1_finalized: BlockInfo,
    /// The L1 head block ref.
    ///
    /// The head may not build on the other L1 fields while the node adapts to an L1 reorg.
    pub head_l1: BlockInfo,
    /// The L1 safe head block ref.
    pub safe_l1: BlockInfo,
    /// The finalized L1 block ref.
    pub finalized_l1: BlockInfo,
    /// The unsafe L2 block ref, the tip of the chain not yet submitted to L1.
    pub unsafe_l2: L2BlockInfo,
    /// The safe L2 block ref, derived from L1 but reorgable with it.
    pub safe_l2: L2BlockInfo,
    /// The finalized L2 block ref, derived from finalized L1 data only.
    pub finalized_l2: L2BlockInfo,
    /// The pending safe L2 block ref: derived, but its span batch is not yet complete.
    pub pending_safe_l2: L2BlockInfo,
}
