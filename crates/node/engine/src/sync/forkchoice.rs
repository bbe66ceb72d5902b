//! Contains the forkchoice state for the L2.

use alloy_eips::BlockNumberOrTag;
use loam_derive::L2ChainProvider;
use loam_genesis::RollupConfig;
use loam_protocol::L2BlockInfo;
use std::fmt::Display;

use crate::SyncStartError;

/// An unsafe, safe, and finalized [`L2BlockInfo`] returned by the [`crate::find_l2_heads`]
/// function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct L2ForkchoiceState {
    /// The unsafe L2 block.
    pub un_safe: L2BlockInfo,
    /// The safe L2 block.
    pub safe: L2BlockInfo,
    /// The finalized L2 block.
    pub finalized: L2BlockInfo,
}

impl Display for L2ForkchoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FINALIZED: {} (#{}) | SAFE: {} (#{}) | UNSAFE: {} (#{})",
            self.finalized.block_info.hash,
            self.finalized.block_info.number,
            self.safe.block_info.hash,
            self.safe.block_info.number,
            self.un_safe.block_info.hash,
            self.un_safe.block_info.number,
        )
    }
}

impl L2ForkchoiceState {
    /// Returns a forkchoice state with every head pinned to the given block.
    pub const fn pinned(block: L2BlockInfo) -> Self {
        Self { un_safe: block, safe: block, finalized: block }
    }

    /// Returns `true` if `finalized <= safe <= unsafe` by block number.
    pub const fn is_ordered(&self) -> bool {
        self.finalized.block_info.number <= self.safe.block_info.number &&
            self.safe.block_info.number <= self.un_safe.block_info.number
    }

    /// Fetches the current forkchoice state of the L2 execution layer.
    ///
    /// - The finalized block may not always be available. If it is not, we fall back to genesis.
    /// - The safe block may not always be available. If it is not, we fall back to the finalized
    ///   block.
    /// - The unsafe block is always assumed to be available.
    pub async fn current<L2: L2ChainProvider + Send>(
        cfg: &RollupConfig,
        l2: &mut L2,
    ) -> Result<Self, SyncStartError> {
        let finalized = match l2
            .l2_block_info_by_label(BlockNumberOrTag::Finalized)
            .await
            .map_err(|e| SyncStartError::Provider(e.into()))?
        {
            Some(block) => block,
            None => l2
                .l2_block_info_by_hash(cfg.genesis.l2.hash)
                .await
                .map_err(|e| SyncStartError::Provider(e.into()))?
                .ok_or(SyncStartError::BlockNotFound(cfg.genesis.l2.hash.into()))?,
        };
        let safe = l2
            .l2_block_info_by_label(BlockNumberOrTag::Safe)
            .await
            .map_err(|e| SyncStartError::Provider(e.into()))?
            .unwrap_or(finalized);
        let un_safe = l2
            .l2_block_info_by_label(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| SyncStartError::Provider(e.into()))?
            .ok_or(SyncStartError::BlockNotFound(BlockNumberOrTag::Latest.into()))?;

        Ok(Self { un_safe, safe, finalized })
    }
}
