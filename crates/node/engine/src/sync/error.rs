//! Errors for the sync start algorithm.

use alloy_eips::{BlockId, BlockNumHash};
use alloy_primitives::B256;
use loam_derive::PipelineErrorKind;
use thiserror::Error;

/// An error that can occur while searching for the L2 heads to start syncing from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncStartError {
    /// A chain provider failed to serve a lookup.
    #[error(transparent)]
    Provider(#[from] PipelineErrorKind),
    /// A block the walk depends on is missing from the chain provider.
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),
    /// The L2 chain does not descend from the configured L2 genesis.
    #[error("Wrong chain L2: genesis {expected}, got {got}")]
    WrongChainL2 {
        /// The configured L2 genesis hash.
        expected: B256,
        /// The hash found at the genesis height.
        got: B256,
    },
    /// The L1 chain does not contain the configured L1 genesis.
    #[error("Wrong chain L1: genesis {expected}, got {got}")]
    WrongChainL1 {
        /// The configured L1 genesis hash.
        expected: B256,
        /// The canonical L1 hash at the genesis origin height.
        got: B256,
    },
    /// The block at the finalized height changed.
    #[error("Reorg of finalized block #{number}: finalized {finalized}, got {got}")]
    ReorgFinalized {
        /// The finalized block number.
        number: u64,
        /// The previously finalized hash.
        finalized: B256,
        /// The hash now found at that height.
        got: B256,
    },
    /// The walk moved the unsafe head further back than the reorg bound allows.
    #[error(
        "Too deep reorg: traversed back to L2 block #{traversed} with L1 origin #{origin}, previous unsafe L1 origin #{previous_origin}"
    )]
    TooDeepReorg {
        /// The L2 block the walk reached.
        traversed: u64,
        /// The L1 origin number of that block.
        origin: u64,
        /// The L1 origin number of the engine's original unsafe head.
        previous_origin: u64,
    },
    /// A parent in a different epoch has an L1 origin that is not the previous L1 block.
    #[error("L2 parent #{parent} has L1 origin #{parent_origin}, not before #{origin}")]
    OriginNotSequential {
        /// The parent L2 block number.
        parent: u64,
        /// The parent's L1 origin number.
        parent_origin: u64,
        /// The child's L1 origin number.
        origin: u64,
    },
    /// The first block of an epoch has a non-zero sequence number.
    #[error("L2 block #{number} starts an epoch with sequence number {seq_num}")]
    EpochStartSequenceNumber {
        /// The L2 block number.
        number: u64,
        /// The offending sequence number.
        seq_num: u64,
    },
    /// A canonical L1 origin's parent is not the L1 origin of the L2 parent.
    #[error("L2 parent #{parent} has L1 origin {got:?}, expected {expected}")]
    ParentOriginMismatch {
        /// The parent L2 block number.
        parent: u64,
        /// The canonical L1 parent hash.
        expected: B256,
        /// The parent's L1 origin.
        got: BlockNumHash,
    },
    /// Two L2 blocks of the same epoch do not have consecutive sequence numbers.
    #[error("Sequence number gap between L2 blocks #{parent} ({parent_seq}) and #{child} ({child_seq})")]
    SequenceNumberGap {
        /// The parent L2 block number.
        parent: u64,
        /// The parent's sequence number.
        parent_seq: u64,
        /// The child L2 block number.
        child: u64,
        /// The child's sequence number.
        child_seq: u64,
    },
}

impl SyncStartError {
    /// Returns `true` if the error needs operator attention rather than a retry.
    ///
    /// A wrong genesis, a reverted finalized block, or a reorg past the depth bound cannot heal
    /// by fetching again. Provider failures are fatal only when the provider marked them critical.
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::WrongChainL2 { .. } |
            Self::WrongChainL1 { .. } |
            Self::ReorgFinalized { .. } |
            Self::TooDeepReorg { .. } => true,
            Self::Provider(kind) => kind.is_critical(),
            _ => false,
        }
    }
}
