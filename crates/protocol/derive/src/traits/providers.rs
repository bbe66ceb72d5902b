//! Chain providers for the derivation pipeline and head reconciliation.

use crate::PipelineErrorKind;
use alloc::{boxed::Box, string::ToString, sync::Arc};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use async_trait::async_trait;
use core::fmt::Display;
use loam_genesis::{RollupConfig, SystemConfig};
use loam_protocol::{BlockInfo, L2BlockInfo};

/// Describes the functionality of a data source that can provide information from the L1 chain.
///
/// A lookup that completes but finds nothing returns `Ok(None)`. `Err` is reserved for failures
/// of the source itself, which the pipeline treats as temporary.
#[async_trait]
pub trait ChainProvider {
    /// The error type for the [`ChainProvider`].
    type Error: Display + ToString + Into<PipelineErrorKind>;

    /// Fetch the L1 [`BlockInfo`] for the given block number.
    async fn block_info_by_number(&mut self, number: u64)
    -> Result<Option<BlockInfo>, Self::Error>;

    /// Fetch the L1 [`BlockInfo`] for the given block hash.
    async fn block_info_by_hash(&mut self, hash: B256) -> Result<Option<BlockInfo>, Self::Error>;

    /// Fetch the L1 [`BlockInfo`] for the given label, such as `latest` or `finalized`.
    async fn block_info_by_label(
        &mut self,
        label: BlockNumberOrTag,
    ) -> Result<Option<BlockInfo>, Self::Error>;
}

/// Describes the functionality of a data source that fetches L2 block references.
#[async_trait]
pub trait L2ChainProvider {
    /// The error type for the [`L2ChainProvider`].
    type Error: Display + ToString + Into<PipelineErrorKind>;

    /// Returns the [`L2BlockInfo`] for the given block hash.
    async fn l2_block_info_by_hash(
        &mut self,
        hash: B256,
    ) -> Result<Option<L2BlockInfo>, Self::Error>;

    /// Returns the [`L2BlockInfo`] for the given label, such as `safe` or `finalized`.
    ///
    /// A numbered label returns the canonical block at that height.
    async fn l2_block_info_by_label(
        &mut self,
        label: BlockNumberOrTag,
    ) -> Result<Option<L2BlockInfo>, Self::Error>;

    /// Returns the [`SystemConfig`] in effect after the L2 block with the given hash.
    async fn system_config_by_hash(
        &mut self,
        hash: B256,
        rollup_config: Arc<RollupConfig>,
    ) -> Result<SystemConfig, Self::Error>;
}
