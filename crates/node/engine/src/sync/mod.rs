//! Sync start algorithm for the rollup node.

use loam_derive::{ChainProvider, L2ChainProvider};
use loam_genesis::RollupConfig;
use loam_protocol::{BlockInfo, L2BlockInfo};
use serde::{Deserialize, Serialize};

mod forkchoice;
pub use forkchoice::L2ForkchoiceState;

mod error;
pub use error::SyncStartError;

use crate::Metrics;

/// The number of sequencing windows the unsafe head may move back before the walk gives up.
///
/// Reorgs this deep happen legitimately only during long L1 outages. Restarting with a larger
/// bound is the operator's escape hatch.
pub const MAX_REORG_SEQ_WINDOWS: u64 = 5;

/// Options for [`find_l2_heads`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Jump straight to the engine's safe head once the highest L2 block with a canonical L1
    /// origin is found, skipping the block-by-block walk in between. A safe head below the
    /// finalized head is never jumped to.
    pub skip_sync_start_check: bool,
}

/// How the engine's labeled heads should be handled before any walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkchoiceOutcome {
    /// The engine finished execution-layer sync without a forkchoice update: safe and finalized
    /// are still at genesis while the unsafe head moved on. Every head is pinned to unsafe.
    FinalityLessSync,
    /// The unsafe head is behind the safe or finalized head, so the engine chain was rewound
    /// without a forkchoice update. Every head is pinned to unsafe.
    CorruptForkchoice,
    /// The labels are consistent; walk back from the unsafe head.
    Traverse,
}

impl ForkchoiceOutcome {
    /// Returns the metric label of the outcome.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FinalityLessSync => "finality_less_sync",
            Self::CorruptForkchoice => "corrupt_forkchoice",
            Self::Traverse => "traverse",
        }
    }
}

/// Classifies the engine's labeled heads.
pub fn classify_forkchoice(cfg: &RollupConfig, current: &L2ForkchoiceState) -> ForkchoiceOutcome {
    let genesis = cfg.genesis.l2.hash;
    let (un_safe, safe, finalized) =
        (current.un_safe.block_info, current.safe.block_info, current.finalized.block_info);

    if finalized.hash == genesis && safe.hash == genesis && un_safe.number > finalized.number {
        ForkchoiceOutcome::FinalityLessSync
    } else if un_safe.number < safe.number || un_safe.number < finalized.number {
        ForkchoiceOutcome::CorruptForkchoice
    } else {
        ForkchoiceOutcome::Traverse
    }
}

/// Searches for the latest [`L2ForkchoiceState`] that we can use to start the sync process with.
///
///   - The *unsafe L2 block*: This is the highest L2 block whose L1 origin is a *plausible*
///     extension of the canonical L1 chain (as known to the rollup node).
///   - The *safe L2 block*: This is the highest L2 block whose epoch's sequencing window is
///     complete within the canonical L1 chain (as known to the rollup node).
///   - The *finalized L2 block*: This is the L2 block which is known to be fully derived from
///     finalized L1 data.
///
/// Plausible: meaning that the blockhash of the L2 block's L1 origin
/// (as reported in the L1 Attributes deposit within the L2 block) is not canonical at another
/// height in the L1 chain, and the same holds for all its ancestors.
///
/// The walk never retries. Provider failures surface as [`SyncStartError::Provider`] for the
/// caller to retry with backoff.
pub async fn find_l2_heads<L1, L2>(
    cfg: &RollupConfig,
    l1: &mut L1,
    l2: &mut L2,
    sync_cfg: &SyncConfig,
) -> Result<L2ForkchoiceState, SyncStartError>
where
    L1: ChainProvider + Send,
    L2: L2ChainProvider + Send,
{
    let mut result = L2ForkchoiceState::current(cfg, l2).await?;
    info!(
        target: "sync_start",
        unsafe = %result.un_safe.block_info.number,
        safe = %result.safe.block_info.number,
        finalized = %result.finalized.block_info.number,
        "Loaded current L2 EL forkchoice state"
    );

    let outcome = classify_forkchoice(cfg, &result);
    loam_macros::inc!(counter, Metrics::SYNC_START_OUTCOMES, "outcome" => outcome.label());
    if outcome != ForkchoiceOutcome::Traverse {
        warn!(
            target: "sync_start",
            outcome = outcome.label(),
            unsafe = %result.un_safe.block_info.number,
            "Pinning every head to the unsafe head"
        );
        return Ok(L2ForkchoiceState::pinned(result.un_safe));
    }

    // Remember the original unsafe head to bound the reorg depth.
    let prev_unsafe = result.un_safe;

    let mut n = result.un_safe;
    let mut un_safe = Some(result.un_safe);
    // The highest L2 block whose L1 origin is confirmed canonical.
    let mut highest_canonical: Option<L2BlockInfo> = None;
    // The L1 block at the height of the current L1 origin.
    let mut l1_block: Option<BlockInfo> = None;
    // Set when the L1 origin of `n` is not yet visible on L1.
    let mut ahead = false;
    let mut ready = false;
    let mut walked = 0u64;

    loop {
        // Traverse L1 by hash once a previous L1 block is known, by number otherwise.
        if l1_block.is_some_and(|b| b.parent_hash == n.l1_origin.hash) {
            l1_block = Some(
                l1.block_info_by_hash(n.l1_origin.hash)
                    .await
                    .map_err(|e| SyncStartError::Provider(e.into()))?
                    .ok_or(SyncStartError::BlockNotFound(n.l1_origin.hash.into()))?,
            );
            ahead = false;
        } else if l1_block.is_none_or(|b| b.hash != n.l1_origin.hash) {
            l1_block = l1
                .block_info_by_number(n.l1_origin.number)
                .await
                .map_err(|e| SyncStartError::Provider(e.into()))?;
            ahead = l1_block.is_none();
        }

        trace!(target: "sync_start", l2_block = %n.block_info.number, ahead, "Walking sync start");

        if n.block_info.number == cfg.genesis.l2.number {
            if n.block_info.hash != cfg.genesis.l2.hash {
                return Err(SyncStartError::WrongChainL2 {
                    expected: cfg.genesis.l2.hash,
                    got: n.block_info.hash,
                });
            }
            if let Some(l1_block) = l1_block.filter(|b| !ahead && b.hash != cfg.genesis.l1.hash) {
                return Err(SyncStartError::WrongChainL1 {
                    expected: cfg.genesis.l1.hash,
                    got: l1_block.hash,
                });
            }
        }

        if n.block_info.number == result.finalized.block_info.number &&
            n.block_info.hash != result.finalized.block_info.hash
        {
            return Err(SyncStartError::ReorgFinalized {
                number: n.block_info.number,
                finalized: result.finalized.block_info.hash,
                got: n.block_info.hash,
            });
        }

        if un_safe.is_none() {
            un_safe = Some(n);
            if n.l1_origin.number + MAX_REORG_SEQ_WINDOWS * cfg.seq_window_size <
                prev_unsafe.l1_origin.number
            {
                return Err(SyncStartError::TooDeepReorg {
                    traversed: n.block_info.number,
                    origin: n.l1_origin.number,
                    previous_origin: prev_unsafe.l1_origin.number,
                });
            }
        }

        let canonical = l1_block.is_some_and(|b| b.hash == n.l1_origin.hash);
        if ahead {
            // The origin cannot be judged yet. Keep the unsafe head, drop the candidate.
            highest_canonical = None;
        } else if canonical {
            if highest_canonical.is_none() {
                highest_canonical = Some(n);
            }
        } else {
            debug!(
                target: "sync_start",
                l2_block = %n.block_info.number,
                l1_origin = %n.l1_origin.number,
                "L1 origin is not canonical"
            );
            un_safe = None;
            highest_canonical = None;
        }

        if n.block_info.number <= result.safe.block_info.number &&
            n.seq_num == 0 &&
            highest_canonical
                .is_some_and(|h| n.l1_origin.number + cfg.seq_window_size < h.l1_origin.number)
        {
            ready = true;
        }

        if n.block_info.number == result.finalized.block_info.number {
            info!(
                target: "sync_start",
                l2_block = %n.block_info.number,
                "Hit finalized L2 head, returning finalized head as safe head"
            );
            result.safe = n;
            result.un_safe = un_safe.unwrap_or(n);
            return Ok(finish(result, walked));
        }

        // A safe label below finalized is stale, so the walk continues down to finalized.
        if sync_cfg.skip_sync_start_check &&
            n.block_info.hash != result.safe.block_info.hash &&
            result.safe.block_info.number >= result.finalized.block_info.number &&
            highest_canonical.is_some_and(|h| h.block_info.hash == n.block_info.hash)
        {
            info!(
                target: "sync_start",
                l2_block = %n.block_info.number,
                safe = %result.safe.block_info.number,
                "Found highest L2 block with canonical L1 origin, jumping to the safe head"
            );
            n = result.safe;
            continue;
        }

        let parent = l2
            .l2_block_info_by_hash(n.block_info.parent_hash)
            .await
            .map_err(|e| SyncStartError::Provider(e.into()))?
            .ok_or(SyncStartError::BlockNotFound(n.block_info.parent_hash.into()))?;
        check_parent_origin(&n, &parent, l1_block.filter(|_| canonical))?;

        n = parent;
        walked += 1;

        // The block at sequence number zero a full window behind the canonical chain was seen on
        // the previous step, so its parent is the safe head.
        if ready {
            result.safe = n;
            result.un_safe = un_safe.unwrap_or(n);
            return Ok(finish(result, walked));
        }
    }
}

/// Checks the L1 origin relationship between an L2 block and its parent.
///
/// `canonical_origin` is the L1 origin block of `n` when it is known to be canonical.
fn check_parent_origin(
    n: &L2BlockInfo,
    parent: &L2BlockInfo,
    canonical_origin: Option<BlockInfo>,
) -> Result<(), SyncStartError> {
    if parent.l1_origin == n.l1_origin {
        if parent.seq_num + 1 != n.seq_num {
            return Err(SyncStartError::SequenceNumberGap {
                parent: parent.block_info.number,
                parent_seq: parent.seq_num,
                child: n.block_info.number,
                child_seq: n.seq_num,
            });
        }
        return Ok(());
    }

    if parent.l1_origin.number + 1 != n.l1_origin.number {
        return Err(SyncStartError::OriginNotSequential {
            parent: parent.block_info.number,
            parent_origin: parent.l1_origin.number,
            origin: n.l1_origin.number,
        });
    }
    if n.seq_num != 0 {
        return Err(SyncStartError::EpochStartSequenceNumber {
            number: n.block_info.number,
            seq_num: n.seq_num,
        });
    }
    if let Some(origin) = canonical_origin.filter(|o| o.parent_hash != parent.l1_origin.hash) {
        return Err(SyncStartError::ParentOriginMismatch {
            parent: parent.block_info.number,
            expected: origin.parent_hash,
            got: parent.l1_origin,
        });
    }
    Ok(())
}

fn finish(result: L2ForkchoiceState, walked: u64) -> L2ForkchoiceState {
    info!(
        target: "sync_start",
        unsafe = %result.un_safe.block_info.number,
        safe = %result.safe.block_info.number,
        finalized = %result.finalized.block_info.number,
        walked,
        "Found L2 heads"
    );
    loam_macros::set!(gauge, Metrics::SYNC_START_BLOCKS_WALKED, walked as f64);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_eips::BlockNumHash;
    use alloy_primitives::B256;
    use loam_genesis::ChainGenesis;

    fn block(number: u64, origin: u64, seq_num: u64) -> L2BlockInfo {
        L2BlockInfo {
            block_info: BlockInfo {
                number,
                hash: B256::with_last_byte(number as u8),
                ..Default::default()
            },
            l1_origin: BlockNumHash { number: origin, hash: B256::with_last_byte(origin as u8) },
            seq_num,
        }
    }

    fn config() -> RollupConfig {
        RollupConfig {
            genesis: ChainGenesis {
                l2: BlockNumHash { number: 0, hash: B256::with_last_byte(0) },
                ..Default::default()
            },
            seq_window_size: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_finality_less_sync() {
        let genesis = block(0, 0, 0);
        let fc = L2ForkchoiceState { un_safe: block(9, 3, 0), safe: genesis, finalized: genesis };
        assert_eq!(classify_forkchoice(&config(), &fc), ForkchoiceOutcome::FinalityLessSync);
    }

    #[test]
    fn test_classify_genesis_only_traverses() {
        let fc = L2ForkchoiceState::pinned(block(0, 0, 0));
        assert_eq!(classify_forkchoice(&config(), &fc), ForkchoiceOutcome::Traverse);
    }

    #[test]
    fn test_classify_corrupt_forkchoice() {
        let fc = L2ForkchoiceState {
            un_safe: block(4, 1, 0),
            safe: block(6, 2, 0),
            finalized: block(0, 0, 0),
        };
        assert_eq!(classify_forkchoice(&config(), &fc), ForkchoiceOutcome::CorruptForkchoice);

        let fc = L2ForkchoiceState {
            un_safe: block(4, 1, 0),
            safe: block(4, 1, 0),
            finalized: block(5, 2, 0),
        };
        assert_eq!(classify_forkchoice(&config(), &fc), ForkchoiceOutcome::CorruptForkchoice);
    }

    #[test]
    fn test_classify_traverse() {
        let fc = L2ForkchoiceState {
            un_safe: block(9, 3, 0),
            safe: block(6, 2, 0),
            finalized: block(2, 1, 0),
        };
        assert_eq!(classify_forkchoice(&config(), &fc), ForkchoiceOutcome::Traverse);
    }

    #[test]
    fn test_parent_origin_checks() {
        let n = block(5, 3, 1);
        assert_eq!(check_parent_origin(&n, &block(4, 3, 0), None), Ok(()));
        assert!(matches!(
            check_parent_origin(&n, &block(4, 3, 1), None),
            Err(SyncStartError::SequenceNumberGap { .. })
        ));

        let n = block(5, 3, 0);
        assert_eq!(check_parent_origin(&n, &block(4, 2, 2), None), Ok(()));
        assert!(matches!(
            check_parent_origin(&n, &block(4, 1, 0), None),
            Err(SyncStartError::OriginNotSequential { .. })
        ));
        assert!(matches!(
            check_parent_origin(&block(5, 3, 2), &block(4, 2, 0), None),
            Err(SyncStartError::EpochStartSequenceNumber { .. })
        ));

        let origin = BlockInfo { parent_hash: B256::with_last_byte(0xff), ..Default::default() };
        assert!(matches!(
            check_parent_origin(&n, &block(4, 2, 0), Some(origin)),
            Err(SyncStartError::ParentOriginMismatch { .. })
        ));
    }
}
