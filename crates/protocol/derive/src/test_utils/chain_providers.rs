//! In-memory implementations of the chain provider traits.

use crate::{
    errors::{PipelineError, PipelineErrorKind},
    traits::{ChainProvider, L2ChainProvider},
};
use alloc::{boxed::Box, string::ToString, sync::Arc};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{B256, map::HashMap};
use async_trait::async_trait;
use loam_genesis::{RollupConfig, SystemConfig};
use loam_protocol::{BlockInfo, L2BlockInfo};

/// An error returned by the test providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestProviderError {
    /// The provider was taken offline.
    #[error("Provider offline")]
    Offline,
    /// No system config is stored for the block.
    #[error("System config not found for block {0}")]
    SystemConfigNotFound(B256),
}

impl From<TestProviderError> for PipelineErrorKind {
    fn from(e: TestProviderError) -> Self {
        PipelineError::Provider(e.to_string()).temp()
    }
}

/// An in-memory L1 [`ChainProvider`].
#[derive(Debug, Clone, Default)]
pub struct TestChainProvider {
    /// Blocks by hash.
    pub blocks: HashMap<B256, BlockInfo>,
    /// Canonical block hashes by number.
    pub canonical: HashMap<u64, B256>,
    /// Block hashes by tag.
    pub labels: HashMap<BlockNumberOrTag, B256>,
    /// When set, every call fails with [`TestProviderError::Offline`].
    pub offline: bool,
}

impl TestChainProvider {
    /// Inserts a block, making it canonical at its height.
    pub fn insert_block(&mut self, block: BlockInfo) {
        self.canonical.insert(block.number, block.hash);
        self.blocks.insert(block.hash, block);
    }

    /// Inserts a block without making it canonical.
    pub fn insert_orphan(&mut self, block: BlockInfo) {
        self.blocks.insert(block.hash, block);
    }

    /// Points a tag such as `finalized` at a block hash.
    pub fn set_label(&mut self, label: BlockNumberOrTag, hash: B256) {
        self.labels.insert(label, hash);
    }

    fn resolve(&self, label: BlockNumberOrTag) -> Option<B256> {
        match label {
            BlockNumberOrTag::Number(n) => self.canonical.get(&n).copied(),
            BlockNumberOrTag::Latest if !self.labels.contains_key(&label) => {
                self.canonical.keys().max().and_then(|n| self.canonical.get(n).copied())
            }
            _ => self.labels.get(&label).copied(),
        }
    }
}

#[async_trait]
impl ChainProvider for TestChainProvider {
    type Error = TestProviderError;

    async fn block_info_by_number(
        &mut self,
        number: u64,
    ) -> Result<Option<BlockInfo>, Self::Error> {
        self.block_info_by_label(BlockNumberOrTag::Number(number)).await
    }

    async fn block_info_by_hash(&mut self, hash: B256) -> Result<Option<BlockInfo>, Self::Error> {
        if self.offline {
            return Err(TestProviderError::Offline);
        }
        Ok(self.blocks.get(&hash).copied())
    }

    async fn block_info_by_label(
        &mut self,
        label: BlockNumberOrTag,
    ) -> Result<Option<BlockInfo>, Self::Error> {
        if self.offline {
            return Err(TestProviderError::Offline);
        }
        Ok(self.resolve(label).and_then(|hash| self.blocks.get(&hash).copied()))
    }
}

/// An in-memory [`L2ChainProvider`].
#[derive(Debug, Clone, Default)]
pub struct TestL2ChainProvider {
    /// Blocks by hash.
    pub blocks: HashMap<B256, L2BlockInfo>,
    /// Canonical block hashes by number.
    pub canonical: HashMap<u64, B256>,
    /// Block hashes by tag.
    pub labels: HashMap<BlockNumberOrTag, B256>,
    /// System configs by block hash.
    pub system_configs: HashMap<B256, SystemConfig>,
    /// When set, every call fails with [`TestProviderError::Offline`].
    pub offline: bool,
}

impl TestL2ChainProvider {
    /// Inserts a block, making it canonical at its height.
    pub fn insert_block(&mut self, block: L2BlockInfo) {
        self.canonical.insert(block.block_info.number, block.block_info.hash);
        self.blocks.insert(block.block_info.hash, block);
    }

    /// Points a tag such as `safe` at a block hash.
    pub fn set_label(&mut self, label: BlockNumberOrTag, hash: B256) {
        self.labels.insert(label, hash);
    }

    /// Stores the system config in effect after the given block.
    pub fn insert_system_config(&mut self, hash: B256, config: SystemConfig) {
        self.system_configs.insert(hash, config);
    }

    fn resolve(&self, label: BlockNumberOrTag) -> Option<B256> {
        match label {
            BlockNumberOrTag::Number(n) => self.canonical.get(&n).copied(),
            BlockNumberOrTag::Latest if !self.labels.contains_key(&label) => {
                self.canonical.keys().max().and_then(|n| self.canonical.get(n).copied())
            }
            _ => self.labels.get(&label).copied(),
        }
    }
}

#[async_trait]
impl L2ChainProvider for TestL2ChainProvider {
    type Error = TestProviderError;

    async fn l2_block_info_by_hash(
        &mut self,
        hash: B256,
    ) -> Result<Option<L2BlockInfo>, Self::Error> {
        if self.offline {
            return Err(TestProviderError::Offline);
        }
        Ok(self.blocks.get(&hash).copied())
    }

    async fn l2_block_info_by_label(
        &mut self,
        label: BlockNumberOrTag,
    ) -> Result<Option<L2BlockInfo>, Self::Error> {
        if self.offline {
            return Err(TestProviderError::Offline);
        }
        Ok(self.resolve(label).and_then(|hash| self.blocks.get(&hash).copied()))
    }

    async fn system_config_by_hash(
        &mut self,
        hash: B256,
        _: Arc<RollupConfig>,
    ) -> Result<SystemConfig, Self::Error> {
        if self.offline {
            return Err(TestProviderError::Offline);
        }
        self.system_configs.get(&hash).copied().ok_or(TestProviderError::SystemConfigNotFound(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chain_provider_labels() {
        let mut provider = TestChainProvider::default();
        let genesis = BlockInfo { hash: B256::with_last_byte(1), ..Default::default() };
        let next = BlockInfo {
            hash: B256::with_last_byte(2),
            number: 1,
            parent_hash: genesis.hash,
            ..Default::default()
        };
        provider.insert_block(genesis);
        provider.insert_block(next);
        provider.set_label(BlockNumberOrTag::Finalized, genesis.hash);

        assert_eq!(provider.block_info_by_label(BlockNumberOrTag::Latest).await, Ok(Some(next)));
        assert_eq!(
            provider.block_info_by_label(BlockNumberOrTag::Finalized).await,
            Ok(Some(genesis))
        );
        assert_eq!(provider.block_info_by_label(BlockNumberOrTag::Safe).await, Ok(None));
        assert_eq!(provider.block_info_by_number(1).await, Ok(Some(next)));
        assert_eq!(provider.block_info_by_number(2).await, Ok(None));
    }

    #[tokio::test]
    async fn test_offline_errors_are_temporary() {
        let mut provider = TestL2ChainProvider { offline: true, ..Default::default() };
        let err = provider.l2_block_info_by_hash(B256::ZERO).await.unwrap_err();
        let kind: PipelineErrorKind = err.into();
        assert!(kind.is_temporary());
    }
}
