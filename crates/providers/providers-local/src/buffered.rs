//! Buffered L1 and L2 providers that serve data from in-memory chain state.
//!
//! Neither provider talks to an RPC endpoint. Blocks are added explicitly and the canonical
//! chain is driven by [`ChainStateEvent`]s, typically forwarded from an execution extension or
//! a block subscription.

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use async_trait::async_trait;
use loam_derive::{ChainProvider, L2ChainProvider, PipelineError, PipelineErrorKind};
use loam_genesis::{RollupConfig, SystemConfig};
use loam_protocol::{
    BlockInfo, FromBlockError, L2BlockInfo, OpBlockConversionError, to_system_config,
};
use op_alloy_consensus::OpBlock;
use std::sync::Arc;

use crate::{CacheStats, CachedL2Block, ChainBufferError, ChainStateBuffer, ChainStateEvent};

/// Records a cache lookup under the given provider method.
#[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
fn record_lookup<T>(method: &'static str, result: Option<T>) -> Option<T> {
    if result.is_some() {
        loam_macros::inc!(gauge, crate::Metrics::CACHE_HITS, "method" => method);
    } else {
        loam_macros::inc!(gauge, crate::Metrics::CACHE_MISSES, "method" => method);
    }
    result
}

/// Forwards a chain event to the buffer, recording the outcome.
async fn apply_event<B: crate::BufferedBlock>(
    buffer: &ChainStateBuffer<B>,
    event: ChainStateEvent,
) -> Result<(), BufferedProviderError> {
    let event_type = event.label();
    let result = buffer.handle_event(event).await;
    match &result {
        Ok(()) => {
            loam_macros::inc!(gauge, crate::Metrics::CHAIN_EVENTS_PROCESSED, "event" => event_type);
        }
        Err(e) => {
            warn!(target: "providers-local", event = event_type, "Rejected chain event: {e}");
            loam_macros::inc!(gauge, crate::Metrics::CHAIN_EVENT_ERRORS, "event" => event_type);
        }
    }
    result.map_err(BufferedProviderError::Buffer)
}

/// A buffered L1 provider that serves [`BlockInfo`]s from in-memory chain state.
///
/// Clones share the same buffer.
#[derive(Debug, Clone)]
pub struct BufferedL1Provider {
    buffer: Arc<ChainStateBuffer<BlockInfo>>,
}

impl BufferedL1Provider {
    /// Create a new buffered L1 provider.
    ///
    /// # Arguments
    /// * `cache_size` - Maximum number of blocks to keep in the LRU cache
    /// * `max_reorg_depth` - Maximum reorg depth to accept
    pub fn new(cache_size: usize, max_reorg_depth: u64) -> Self {
        Self { buffer: Arc::new(ChainStateBuffer::new(cache_size, max_reorg_depth)) }
    }

    /// Add a block to the buffer. It becomes canonical once a chain event commits it.
    pub async fn add_block(&self, block: BlockInfo) {
        self.buffer.insert_block(block).await;
        loam_macros::inc!(gauge, crate::Metrics::BLOCKS_ADDED, "chain" => "l1");
    }

    /// Process a chain state event.
    pub async fn handle_chain_event(
        &self,
        event: ChainStateEvent,
    ) -> Result<(), BufferedProviderError> {
        apply_event(&self.buffer, event).await
    }

    /// Points the `safe` or `finalized` label at a canonical block.
    pub async fn set_label(
        &self,
        label: BlockNumberOrTag,
        hash: B256,
    ) -> Result<(), BufferedProviderError> {
        Ok(self.buffer.set_label(label, hash).await?)
    }

    /// Get the current chain head.
    pub async fn current_head(&self) -> Option<B256> {
        self.buffer.canonical_head().await
    }

    /// Get cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.buffer.cache_stats().await
    }

    /// Clear the cache.
    pub async fn clear_cache(&self) {
        self.buffer.clear().await;
    }
}

#[async_trait]
impl ChainProvider for BufferedL1Provider {
    type Error = BufferedProviderError;

    async fn block_info_by_number(
        &mut self,
        number: u64,
    ) -> Result<Option<BlockInfo>, Self::Error> {
        Ok(record_lookup("block_info_by_number", self.buffer.get_block_by_number(number).await))
    }

    async fn block_info_by_hash(&mut self, hash: B256) -> Result<Option<BlockInfo>, Self::Error> {
        Ok(record_lookup("block_info_by_hash", self.buffer.get_block_by_hash(hash).await))
    }

    async fn block_info_by_label(
        &mut self,
        label: BlockNumberOrTag,
    ) -> Result<Option<BlockInfo>, Self::Error> {
        Ok(record_lookup("block_info_by_label", self.buffer.get_block_by_label(label).await))
    }
}

/// A buffered L2 provider that serves data from in-memory chain state.
///
/// Full blocks are cached so the system config can be rebuilt for any cached block. Clones
/// share the same buffer.
#[derive(Debug, Clone)]
pub struct BufferedL2Provider {
    /// Chain state buffer for storing blocks
    buffer: Arc<ChainStateBuffer<CachedL2Block>>,
    /// Rollup configuration
    rollup_config: Arc<RollupConfig>,
}

impl BufferedL2Provider {
    /// Create a new buffered L2 provider.
    ///
    /// # Arguments
    /// * `rollup_config` - The rollup configuration containing genesis and chain parameters
    /// * `cache_size` - Maximum number of blocks to keep in the LRU cache
    /// * `max_reorg_depth` - Maximum reorg depth to accept
    pub fn new(rollup_config: Arc<RollupConfig>, cache_size: usize, max_reorg_depth: u64) -> Self {
        Self {
            buffer: Arc::new(ChainStateBuffer::new(cache_size, max_reorg_depth)),
            rollup_config,
        }
    }

    /// Add a block to the buffer, returning its extracted [`L2BlockInfo`].
    ///
    /// The block becomes canonical once a chain event commits it.
    pub async fn add_block(&self, block: OpBlock) -> Result<L2BlockInfo, BufferedProviderError> {
        let l2_block_info =
            L2BlockInfo::from_block_and_genesis(&block, &self.rollup_config.genesis)?;
        self.buffer.insert_block(CachedL2Block { block, l2_block_info }).await;
        loam_macros::inc!(gauge, crate::Metrics::BLOCKS_ADDED, "chain" => "l2");
        Ok(l2_block_info)
    }

    /// Process a chain state event.
    pub async fn handle_chain_event(
        &self,
        event: ChainStateEvent,
    ) -> Result<(), BufferedProviderError> {
        apply_event(&self.buffer, event).await
    }

    /// Points the `safe` or `finalized` label at a canonical block.
    pub async fn set_label(
        &self,
        label: BlockNumberOrTag,
        hash: B256,
    ) -> Result<(), BufferedProviderError> {
        Ok(self.buffer.set_label(label, hash).await?)
    }

    /// Returns the full canonical block at `number`, if cached.
    pub async fn block_by_number(&self, number: u64) -> Option<OpBlock> {
        record_lookup("block_by_number", self.buffer.get_block_by_number(number).await)
            .map(|cached| cached.block)
    }

    /// Get the current chain head.
    pub async fn current_head(&self) -> Option<B256> {
        self.buffer.canonical_head().await
    }

    /// Get cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.buffer.cache_stats().await
    }

    /// Clear the cache.
    pub async fn clear_cache(&self) {
        self.buffer.clear().await;
    }
}

#[async_trait]
impl L2ChainProvider for BufferedL2Provider {
    type Error = BufferedProviderError;

    async fn l2_block_info_by_hash(
        &mut self,
        hash: B256,
    ) -> Result<Option<L2BlockInfo>, Self::Error> {
        let cached = record_lookup("l2_block_info", self.buffer.get_block_by_hash(hash).await);
        Ok(cached.map(|cached| cached.l2_block_info))
    }

    async fn l2_block_info_by_label(
        &mut self,
        label: BlockNumberOrTag,
    ) -> Result<Option<L2BlockInfo>, Self::Error> {
        let cached = record_lookup("l2_block_info", self.buffer.get_block_by_label(label).await);
        Ok(cached.map(|cached| cached.l2_block_info))
    }

    async fn system_config_by_hash(
        &mut self,
        hash: B256,
        rollup_config: Arc<RollupConfig>,
    ) -> Result<SystemConfig, Self::Error> {
        if hash == rollup_config.genesis.l2.hash {
            return rollup_config
                .genesis
                .system_config
                .ok_or(BufferedProviderError::SystemConfigMissing);
        }

        let cached = record_lookup("system_config", self.buffer.get_block_by_hash(hash).await)
            .ok_or(BufferedProviderError::BlockNotFound(hash))?;
        Ok(to_system_config(&cached.block, &rollup_config)?)
    }
}

/// Errors that can occur in the buffered providers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferedProviderError {
    /// Error from the chain buffer
    #[error("Buffer error: {0}")]
    Buffer(#[from] ChainBufferError),
    /// Block not found in cache
    #[error("Block {0} not found in cache")]
    BlockNotFound(B256),
    /// The block reference could not be extracted.
    #[error("Failed to extract block info: {0}")]
    L2BlockInfo(#[from] FromBlockError),
    /// Failed to convert block to SystemConfig
    #[error("Failed to rebuild system config: {0}")]
    SystemConfigConversion(#[from] OpBlockConversionError),
    /// System config missing from genesis
    #[error("System config missing from genesis")]
    SystemConfigMissing,
}

impl From<BufferedProviderError> for PipelineErrorKind {
    fn from(e: BufferedProviderError) -> Self {
        let critical = match &e {
            BufferedProviderError::Buffer(err) => err.is_critical(),
            BufferedProviderError::SystemConfigMissing => true,
            _ => false,
        };
        let err = PipelineError::Provider(e.to_string());
        if critical { err.crit() } else { err.temp() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_protocol::{L1BlockInfoEcotone, L1BlockInfoTx, test_utils::l2_block_with_deposit};

    fn l1_block(number: u64) -> BlockInfo {
        BlockInfo {
            hash: B256::left_padding_from(&number.to_be_bytes()),
            number,
            parent_hash: B256::left_padding_from(&number.wrapping_sub(1).to_be_bytes()),
            timestamp: number * 12,
        }
    }

    #[tokio::test]
    async fn test_l1_provider_serves_committed_blocks() {
        let mut provider = BufferedL1Provider::new(16, 4);
        for n in 1..=3 {
            provider.add_block(l1_block(n)).await;
        }
        assert_eq!(provider.block_info_by_number(1).await, Ok(None));

        provider
            .handle_chain_event(ChainStateEvent::ChainCommitted {
                new_head: l1_block(3).hash,
                committed: (1..=3).map(|n| l1_block(n).hash).collect(),
            })
            .await
            .unwrap();

        assert_eq!(provider.block_info_by_number(2).await, Ok(Some(l1_block(2))));
        assert_eq!(provider.block_info_by_hash(l1_block(1).hash).await, Ok(Some(l1_block(1))));
        assert_eq!(
            provider.block_info_by_label(BlockNumberOrTag::Latest).await,
            Ok(Some(l1_block(3)))
        );
        assert_eq!(provider.current_head().await, Some(l1_block(3).hash));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = BufferedL1Provider::new(16, 4);
        let mut reader = provider.clone();
        provider.add_block(l1_block(1)).await;
        assert_eq!(reader.block_info_by_hash(l1_block(1).hash).await, Ok(Some(l1_block(1))));
    }

    #[tokio::test]
    async fn test_l2_add_block_extracts_info() {
        let provider = BufferedL2Provider::new(Arc::new(RollupConfig::default()), 16, 4);
        let calldata = L1BlockInfoTx::Ecotone(L1BlockInfoEcotone {
            number: 7,
            block_hash: B256::with_last_byte(7),
            sequence_number: 2,
            ..Default::default()
        })
        .encode_calldata();
        let block = l2_block_with_deposit(5, 10, B256::with_last_byte(4), &calldata);

        let info = provider.add_block(block).await.unwrap();
        assert_eq!(info.l1_origin.number, 7);
        assert_eq!(info.seq_num, 2);
        assert_eq!(info.block_info.number, 5);
    }

    #[tokio::test]
    async fn test_l2_add_block_without_deposit() {
        let provider = BufferedL2Provider::new(Arc::new(RollupConfig::default()), 16, 4);
        let err = provider.add_block(OpBlock::default()).await;
        assert!(matches!(err, Err(BufferedProviderError::L2BlockInfo(_))));
    }

    #[tokio::test]
    async fn test_genesis_system_config() {
        let mut rollup_config = RollupConfig::default();
        rollup_config.genesis.l2.hash = B256::with_last_byte(0x11);
        rollup_config.genesis.system_config = Some(SystemConfig::default());
        let rollup_config = Arc::new(rollup_config);
        let mut provider = BufferedL2Provider::new(rollup_config.clone(), 16, 4);

        let config =
            provider.system_config_by_hash(B256::with_last_byte(0x11), rollup_config.clone()).await;
        assert_eq!(config, Ok(SystemConfig::default()));

        let missing =
            provider.system_config_by_hash(B256::with_last_byte(0x12), rollup_config).await;
        assert_eq!(missing, Err(BufferedProviderError::BlockNotFound(B256::with_last_byte(0x12))));
    }

    #[test]
    fn test_error_kinds() {
        let deep = BufferedProviderError::Buffer(ChainBufferError::ReorgTooDeep {
            depth: 9,
            max_depth: 4,
        });
        assert!(PipelineErrorKind::from(deep).is_critical());
        assert!(PipelineErrorKind::from(BufferedProviderError::SystemConfigMissing).is_critical());

        let miss = BufferedProviderError::BlockNotFound(B256::ZERO);
        assert!(PipelineErrorKind::from(miss).is_temporary());
    }
}
