//! Response types for the rollup node API.

use loam_protocol::{L2BlockInfo, SyncStatus};
use serde::{Deserialize, Serialize};

/// An L2 block ref read under a given sync status.
///
/// Both halves come from the same engine snapshot, so `block_ref` is canonical as of `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRefWithStatus {
    /// The L2 block ref.
    pub block_ref: L2BlockInfo,
    /// The sync status the block ref was read under.
    pub status: SyncStatus,
}
