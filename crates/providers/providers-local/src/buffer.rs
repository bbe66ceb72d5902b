//! Chain state buffer backing the buffered providers.
//!
//! The buffer keeps an LRU cache of blocks by hash and an LRU index of canonical block hashes
//! by number. Blocks enter the cache through [`ChainStateBuffer::insert_block`] and only become
//! canonical once a [`ChainStateEvent`] commits them, so a reorg can be described by hashes
//! alone: the new branch is walked back through the cache until it meets the canonical chain.

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use loam_protocol::{BlockInfo, L2BlockInfo};
use lru::LruCache;
use op_alloy_consensus::OpBlock;
use std::num::NonZeroUsize;
use tokio::sync::RwLock;

/// A block that can be held in a [`ChainStateBuffer`].
pub trait BufferedBlock: Clone + Send + Sync {
    /// Returns the header fields of the block.
    fn block_info(&self) -> BlockInfo;
}

impl BufferedBlock for BlockInfo {
    fn block_info(&self) -> BlockInfo {
        *self
    }
}

/// A full L2 block together with the [`L2BlockInfo`] extracted from it.
#[derive(Debug, Clone)]
pub struct CachedL2Block {
    /// The block, kept for system config extraction.
    pub block: OpBlock,
    /// The extracted block reference.
    pub l2_block_info: L2BlockInfo,
}

impl BufferedBlock for CachedL2Block {
    fn block_info(&self) -> BlockInfo {
        self.l2_block_info.block_info
    }
}

/// Events that move the canonical chain of a [`ChainStateBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStateEvent {
    /// New blocks have been committed on top of the canonical head.
    ChainCommitted {
        /// The new chain head.
        new_head: B256,
        /// The committed blocks, lowest first.
        committed: Vec<B256>,
    },
    /// The canonical chain switched to another branch.
    ChainReorged {
        /// The chain head before the reorg.
        old_head: B256,
        /// The head of the new branch.
        new_head: B256,
        /// How many canonical blocks the reorg reverts.
        depth: u64,
    },
    /// The top of the canonical chain was dropped.
    ChainReverted {
        /// The chain head before the revert.
        old_head: B256,
        /// The chain head after the revert.
        new_head: B256,
        /// The blocks that were reverted.
        reverted: Vec<B256>,
    },
}

impl ChainStateEvent {
    /// Returns the metric label of the event.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ChainCommitted { .. } => "committed",
            Self::ChainReorged { .. } => "reorged",
            Self::ChainReverted { .. } => "reverted",
        }
    }
}

/// A cached block and whether it sits on the canonical chain.
#[derive(Debug, Clone)]
struct CachedBlock<B> {
    block: B,
    canonical: bool,
}

#[derive(Debug)]
struct BufferState<B> {
    blocks_by_hash: LruCache<B256, CachedBlock<B>>,
    blocks_by_number: LruCache<u64, B256>,
    head: Option<BlockInfo>,
    safe: Option<BlockInfo>,
    finalized: Option<BlockInfo>,
}

impl<B: BufferedBlock> BufferState<B> {
    fn info(&self, hash: B256) -> Result<BlockInfo, ChainBufferError> {
        self.blocks_by_hash
            .peek(&hash)
            .map(|cached| cached.block.block_info())
            .ok_or(ChainBufferError::BlockNotFound { hash })
    }

    fn is_canonical(&self, info: &BlockInfo) -> bool {
        self.blocks_by_number.peek(&info.number) == Some(&info.hash)
    }

    fn expect_head(&self, expected: B256) -> Result<BlockInfo, ChainBufferError> {
        match self.head {
            Some(head) if head.hash == expected => Ok(head),
            head => Err(ChainBufferError::HeadMismatch { expected, got: head.map(|h| h.hash) }),
        }
    }

    /// Drops every canonical entry above `number`.
    fn unwind_to(&mut self, number: u64, from: u64) {
        for n in (number + 1..=from).rev() {
            if let Some(hash) = self.blocks_by_number.pop(&n) {
                if let Some(cached) = self.blocks_by_hash.get_mut(&hash) {
                    cached.canonical = false;
                }
            }
        }
        if self.safe.is_some_and(|safe| safe.number > number) {
            self.safe = None;
        }
    }

    /// Makes `hash` canonical on top of the current head.
    fn extend(&mut self, hash: B256) -> Result<(), ChainBufferError> {
        let info = self.info(hash)?;
        if let Some(head) = self.head.filter(|head| !head.is_parent_of(&info)) {
            return Err(ChainBufferError::NotContiguous { block: info.id(), head: head.id() });
        }
        if let Some(cached) = self.blocks_by_hash.get_mut(&hash) {
            cached.canonical = true;
        }
        self.blocks_by_number.put(info.number, hash);
        self.head = Some(info);
        Ok(())
    }

    fn guard_finalized(&self, fork: u64) -> Result<(), ChainBufferError> {
        match self.finalized {
            Some(finalized) if finalized.number > fork => {
                Err(ChainBufferError::FinalizedReorg { finalized: finalized.number, fork })
            }
            _ => Ok(()),
        }
    }
}

/// Buffer for chain state with LRU caching and reorg handling.
///
/// Reorgs deeper than the configured limit are rejected and leave the buffer untouched, as
/// does any reorg or revert that would drop the finalized block.
#[derive(Debug)]
pub struct ChainStateBuffer<B> {
    state: RwLock<BufferState<B>>,
    capacity: NonZeroUsize,
    max_reorg_depth: u64,
}

impl<B: BufferedBlock> ChainStateBuffer<B> {
    /// Create a new chain state buffer.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of blocks to cache. Zero is treated as one.
    /// * `max_reorg_depth` - Maximum reorg depth to accept
    pub fn new(capacity: usize, max_reorg_depth: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: RwLock::new(BufferState {
                blocks_by_hash: LruCache::new(capacity),
                blocks_by_number: LruCache::new(capacity),
                head: None,
                safe: None,
                finalized: None,
            }),
            capacity,
            max_reorg_depth,
        }
    }

    /// Get block by hash from cache, canonical or not.
    pub async fn get_block_by_hash(&self, hash: B256) -> Option<B> {
        let state = self.state.read().await;
        state.blocks_by_hash.peek(&hash).map(|cached| cached.block.clone())
    }

    /// Get the canonical block at `number` from cache.
    pub async fn get_block_by_number(&self, number: u64) -> Option<B> {
        let state = self.state.read().await;
        let hash = state.blocks_by_number.peek(&number)?;
        state.blocks_by_hash.peek(hash).map(|cached| cached.block.clone())
    }

    /// Resolves a label against the canonical chain.
    ///
    /// `latest` and `pending` are the canonical head, `earliest` is block zero.
    pub async fn get_block_by_label(&self, label: BlockNumberOrTag) -> Option<B> {
        let hash = {
            let state = self.state.read().await;
            match label {
                BlockNumberOrTag::Latest | BlockNumberOrTag::Pending => state.head?.hash,
                BlockNumberOrTag::Safe => state.safe?.hash,
                BlockNumberOrTag::Finalized => state.finalized?.hash,
                BlockNumberOrTag::Earliest => *state.blocks_by_number.peek(&0)?,
                BlockNumberOrTag::Number(n) => *state.blocks_by_number.peek(&n)?,
            }
        };
        self.get_block_by_hash(hash).await
    }

    /// Returns whether the cached block with `hash` is on the canonical chain.
    pub async fn is_canonical(&self, hash: B256) -> bool {
        let state = self.state.read().await;
        state.blocks_by_hash.peek(&hash).is_some_and(|cached| cached.canonical)
    }

    /// Insert a block into the cache. It stays off the canonical chain until committed.
    pub async fn insert_block(&self, block: B) {
        let mut state = self.state.write().await;
        let hash = block.block_info().hash;
        let canonical = state.blocks_by_hash.peek(&hash).is_some_and(|cached| cached.canonical);
        state.blocks_by_hash.put(hash, CachedBlock { block, canonical });

        loam_macros::set!(
            gauge,
            crate::Metrics::CACHE_ENTRIES,
            "cache",
            "blocks_by_hash",
            state.blocks_by_hash.len() as f64
        );
    }

    /// Points the `safe` or `finalized` label at a canonical block.
    pub async fn set_label(
        &self,
        label: BlockNumberOrTag,
        hash: B256,
    ) -> Result<(), ChainBufferError> {
        let mut state = self.state.write().await;
        let info = state.info(hash)?;
        if !state.is_canonical(&info) {
            return Err(ChainBufferError::NonCanonical { hash });
        }
        match label {
            BlockNumberOrTag::Safe => state.safe = Some(info),
            BlockNumberOrTag::Finalized => state.finalized = Some(info),
            label => return Err(ChainBufferError::UnsupportedLabel(label)),
        }
        Ok(())
    }

    /// Handle a chain state event.
    ///
    /// A rejected event leaves the canonical chain as it was.
    pub async fn handle_event(&self, event: ChainStateEvent) -> Result<(), ChainBufferError> {
        match event {
            ChainStateEvent::ChainCommitted { new_head, committed } => {
                self.handle_chain_committed(new_head, committed).await
            }
            ChainStateEvent::ChainReorged { old_head, new_head, depth } => {
                self.handle_chain_reorged(old_head, new_head, depth).await
            }
            ChainStateEvent::ChainReverted { old_head, new_head, reverted } => {
                self.handle_chain_reverted(old_head, new_head, reverted).await
            }
        }
    }

    async fn handle_chain_committed(
        &self,
        new_head: B256,
        committed: Vec<B256>,
    ) -> Result<(), ChainBufferError> {
        let mut state = self.state.write().await;

        // Validate the whole extension before touching the canonical index.
        let mut tip = state.head;
        for hash in &committed {
            let info = state.info(*hash)?;
            if let Some(tip) = tip.filter(|tip| !tip.is_parent_of(&info)) {
                return Err(ChainBufferError::NotContiguous { block: info.id(), head: tip.id() });
            }
            tip = Some(info);
        }
        if tip.map(|t| t.hash) != Some(new_head) {
            return Err(ChainBufferError::HeadMismatch {
                expected: new_head,
                got: tip.map(|t| t.hash),
            });
        }

        for hash in committed {
            state.extend(hash)?;
        }
        Ok(())
    }

    async fn handle_chain_reorged(
        &self,
        old_head: B256,
        new_head: B256,
        depth: u64,
    ) -> Result<(), ChainBufferError> {
        if depth > self.max_reorg_depth {
            return Err(ChainBufferError::ReorgTooDeep { depth, max_depth: self.max_reorg_depth });
        }

        let mut state = self.state.write().await;
        let old = state.expect_head(old_head)?;

        // Walk the new branch back until it meets the canonical chain.
        let mut branch = Vec::new();
        let mut cursor = state.info(new_head)?;
        while !state.is_canonical(&cursor) {
            if cursor.number == 0 || old.number.saturating_sub(cursor.number) > depth {
                return Err(ChainBufferError::ReorgDepthMismatch {
                    reported: depth,
                    actual: old.number.saturating_sub(cursor.number) + 1,
                });
            }
            branch.push(cursor.hash);
            cursor = state.info(cursor.parent_hash)?;
        }
        let fork = cursor;
        let actual = old.number - fork.number;
        if actual != depth {
            return Err(ChainBufferError::ReorgDepthMismatch { reported: depth, actual });
        }
        state.guard_finalized(fork.number)?;

        state.unwind_to(fork.number, old.number);
        state.head = Some(fork);
        for hash in branch.into_iter().rev() {
            state.extend(hash)?;
        }

        loam_macros::set!(gauge, crate::Metrics::REORG_DEPTH, depth as f64);
        info!(
            target: "providers-local",
            depth,
            fork = fork.number,
            old_head = %old_head,
            new_head = %new_head,
            "Handled chain reorg"
        );
        Ok(())
    }

    async fn handle_chain_reverted(
        &self,
        old_head: B256,
        new_head: B256,
        reverted: Vec<B256>,
    ) -> Result<(), ChainBufferError> {
        let mut state = self.state.write().await;
        let old = state.expect_head(old_head)?;
        let new = state.info(new_head)?;
        if !state.is_canonical(&new) {
            return Err(ChainBufferError::NonCanonical { hash: new_head });
        }
        state.guard_finalized(new.number)?;

        state.unwind_to(new.number, old.number);
        for hash in reverted {
            state.blocks_by_hash.pop(&hash);
        }
        state.head = Some(new);

        debug!(target: "providers-local", from = old.number, to = new.number, "Reverted chain");
        Ok(())
    }

    /// Get the current canonical head.
    pub async fn canonical_head(&self) -> Option<B256> {
        self.state.read().await.head.map(|head| head.hash)
    }

    /// Get cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        let state = self.state.read().await;
        CacheStats {
            blocks_by_hash_len: state.blocks_by_hash.len(),
            blocks_by_number_len: state.blocks_by_number.len(),
            capacity: self.capacity.get(),
            max_reorg_depth: self.max_reorg_depth,
        }
    }

    /// Clear the entire cache, including the head and labels.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.blocks_by_hash.clear();
        state.blocks_by_number.clear();
        state.head = None;
        state.safe = None;
        state.finalized = None;

        loam_macros::inc!(gauge, crate::Metrics::CACHE_CLEARS);
        loam_macros::set!(gauge, crate::Metrics::CACHE_ENTRIES, "cache", "blocks_by_hash", 0);
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of blocks cached by hash
    pub blocks_by_hash_len: usize,
    /// Number of canonical blocks indexed by number
    pub blocks_by_number_len: usize,
    /// Total cache capacity
    pub capacity: usize,
    /// Maximum reorg depth supported
    pub max_reorg_depth: u64,
}

/// Errors that can occur in the chain buffer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainBufferError {
    /// Reorg is too deep to handle
    #[error("Reorg depth {depth} exceeds maximum supported depth {max_depth}")]
    ReorgTooDeep {
        /// The depth of the reorg attempted
        depth: u64,
        /// The maximum supported reorg depth
        max_depth: u64,
    },
    /// The reported reorg depth does not match the cached branch.
    #[error("Reorg reported depth {reported}, but the new branch forks {actual} blocks deep")]
    ReorgDepthMismatch {
        /// The depth carried by the event.
        reported: u64,
        /// The depth found by walking the branch.
        actual: u64,
    },
    /// Block not found in cache
    #[error("Block not found in cache: {hash}")]
    BlockNotFound {
        /// The hash of the block that was not found
        hash: B256,
    },
    /// The block is cached but not canonical.
    #[error("Block {hash} is not canonical")]
    NonCanonical {
        /// The block hash.
        hash: B256,
    },
    /// The event names a head other than the current one.
    #[error("Expected head {expected}, found {got:?}")]
    HeadMismatch {
        /// The head named by the event.
        expected: B256,
        /// The current head.
        got: Option<B256>,
    },
    /// A committed block does not build on the head.
    #[error("Block {block:?} does not extend head {head:?}")]
    NotContiguous {
        /// The committed block.
        block: alloy_eips::BlockNumHash,
        /// The head it should extend.
        head: alloy_eips::BlockNumHash,
    },
    /// The event would drop the finalized block.
    #[error("Cannot revert finalized block {finalized} to fork point {fork}")]
    FinalizedReorg {
        /// The finalized block number.
        finalized: u64,
        /// The block number the chain would fall back to.
        fork: u64,
    },
    /// Only `safe` and `finalized` can be pointed at a block.
    #[error("Label {0} cannot be set")]
    UnsupportedLabel(BlockNumberOrTag),
}

impl ChainBufferError {
    /// Returns whether the error means the buffer can no longer follow the chain.
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::ReorgTooDeep { .. } | Self::FinalizedReorg { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(number: u64, parent: &BlockInfo, fork: u8) -> BlockInfo {
        let mut hash = B256::left_padding_from(&number.to_be_bytes());
        hash.0[0] = fork;
        BlockInfo { hash, number, parent_hash: parent.hash, timestamp: number * 2 }
    }

    async fn chain(buffer: &ChainStateBuffer<BlockInfo>, len: u64) -> Vec<BlockInfo> {
        let genesis = BlockInfo { hash: B256::with_last_byte(0xff), ..Default::default() };
        let mut blocks = vec![genesis];
        for n in 1..len {
            let next = block(n, &blocks[n as usize - 1], 0);
            blocks.push(next);
        }
        for b in &blocks {
            buffer.insert_block(*b).await;
        }
        let committed = blocks.iter().map(|b| b.hash).collect();
        let new_head = blocks[len as usize - 1].hash;
        buffer
            .handle_event(ChainStateEvent::ChainCommitted { new_head, committed })
            .await
            .unwrap();
        blocks
    }

    #[tokio::test]
    async fn test_inserted_blocks_are_not_canonical() {
        let buffer = ChainStateBuffer::new(16, 4);
        let b = BlockInfo { hash: B256::with_last_byte(1), number: 1, ..Default::default() };
        buffer.insert_block(b).await;

        assert_eq!(buffer.get_block_by_hash(b.hash).await, Some(b));
        assert_eq!(buffer.get_block_by_number(1).await, None);
        assert!(!buffer.is_canonical(b.hash).await);
    }

    #[tokio::test]
    async fn test_commit_and_labels() {
        let buffer = ChainStateBuffer::new(16, 4);
        let blocks = chain(&buffer, 5).await;

        assert_eq!(buffer.canonical_head().await, Some(blocks[4].hash));
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Latest).await, Some(blocks[4]));
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Earliest).await, Some(blocks[0]));
        assert_eq!(buffer.get_block_by_number(2).await, Some(blocks[2]));
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Safe).await, None);

        buffer.set_label(BlockNumberOrTag::Safe, blocks[3].hash).await.unwrap();
        buffer.set_label(BlockNumberOrTag::Finalized, blocks[1].hash).await.unwrap();
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Safe).await, Some(blocks[3]));
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Finalized).await, Some(blocks[1]));
        assert_eq!(
            buffer.set_label(BlockNumberOrTag::Latest, blocks[1].hash).await,
            Err(ChainBufferError::UnsupportedLabel(BlockNumberOrTag::Latest))
        );
    }

    #[tokio::test]
    async fn test_commit_rejects_gap() {
        let buffer = ChainStateBuffer::new(16, 4);
        let blocks = chain(&buffer, 3).await;
        let stray = block(4, &blocks[2], 0);
        buffer.insert_block(stray).await;

        let err = buffer
            .handle_event(ChainStateEvent::ChainCommitted {
                new_head: stray.hash,
                committed: vec![stray.hash],
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChainBufferError::NotContiguous { block: stray.id(), head: blocks[2].id() }
        );
        assert_eq!(buffer.canonical_head().await, Some(blocks[2].hash));
    }

    #[tokio::test]
    async fn test_reorg_switches_branch() {
        let buffer = ChainStateBuffer::new(32, 4);
        let blocks = chain(&buffer, 6).await;
        buffer.set_label(BlockNumberOrTag::Safe, blocks[4].hash).await.unwrap();

        // Fork off block 3, replacing blocks 4 and 5 with a longer branch.
        let b4 = block(4, &blocks[3], 1);
        let b5 = block(5, &b4, 1);
        let b6 = block(6, &b5, 1);
        for b in [b4, b5, b6] {
            buffer.insert_block(b).await;
        }
        buffer
            .handle_event(ChainStateEvent::ChainReorged {
                old_head: blocks[5].hash,
                new_head: b6.hash,
                depth: 2,
            })
            .await
            .unwrap();

        assert_eq!(buffer.canonical_head().await, Some(b6.hash));
        assert_eq!(buffer.get_block_by_number(4).await, Some(b4));
        assert_eq!(buffer.get_block_by_number(6).await, Some(b6));
        assert!(!buffer.is_canonical(blocks[4].hash).await);
        assert!(buffer.get_block_by_hash(blocks[4].hash).await.is_some());
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Safe).await, None);
    }

    #[tokio::test]
    async fn test_reorg_too_deep() {
        let buffer = ChainStateBuffer::<BlockInfo>::new(100, 5);

        let event = ChainStateEvent::ChainReorged {
            old_head: B256::with_last_byte(1),
            new_head: B256::with_last_byte(2),
            depth: 10,
        };

        let err = buffer.handle_event(event).await.unwrap_err();
        assert_eq!(err, ChainBufferError::ReorgTooDeep { depth: 10, max_depth: 5 });
        assert!(err.is_critical());
    }

    #[tokio::test]
    async fn test_reorg_depth_must_match_branch() {
        let buffer = ChainStateBuffer::new(32, 8);
        let blocks = chain(&buffer, 6).await;
        let b5 = block(5, &blocks[4], 1);
        buffer.insert_block(b5).await;

        let err = buffer
            .handle_event(ChainStateEvent::ChainReorged {
                old_head: blocks[5].hash,
                new_head: b5.hash,
                depth: 3,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ChainBufferError::ReorgDepthMismatch { reported: 3, actual: 1 });
        assert_eq!(buffer.canonical_head().await, Some(blocks[5].hash));
    }

    #[tokio::test]
    async fn test_reorg_below_finalized_rejected() {
        let buffer = ChainStateBuffer::new(32, 8);
        let blocks = chain(&buffer, 6).await;
        buffer.set_label(BlockNumberOrTag::Finalized, blocks[4].hash).await.unwrap();
        let b4 = block(4, &blocks[3], 1);
        buffer.insert_block(b4).await;

        let err = buffer
            .handle_event(ChainStateEvent::ChainReorged {
                old_head: blocks[5].hash,
                new_head: b4.hash,
                depth: 2,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ChainBufferError::FinalizedReorg { finalized: 4, fork: 3 });
        assert_eq!(buffer.get_block_by_number(4).await, Some(blocks[4]));
    }

    #[tokio::test]
    async fn test_revert() {
        let buffer = ChainStateBuffer::new(32, 8);
        let blocks = chain(&buffer, 6).await;

        buffer
            .handle_event(ChainStateEvent::ChainReverted {
                old_head: blocks[5].hash,
                new_head: blocks[3].hash,
                reverted: vec![blocks[5].hash, blocks[4].hash],
            })
            .await
            .unwrap();

        assert_eq!(buffer.canonical_head().await, Some(blocks[3].hash));
        assert_eq!(buffer.get_block_by_hash(blocks[4].hash).await, None);
        assert_eq!(buffer.get_block_by_number(5).await, None);
        assert_eq!(buffer.cache_stats().await.blocks_by_number_len, 4);
    }

    #[tokio::test]
    async fn test_revert_from_stale_head() {
        let buffer = ChainStateBuffer::new(32, 8);
        let blocks = chain(&buffer, 3).await;

        let err = buffer
            .handle_event(ChainStateEvent::ChainReverted {
                old_head: blocks[1].hash,
                new_head: blocks[0].hash,
                reverted: vec![blocks[1].hash],
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChainBufferError::HeadMismatch { expected: blocks[1].hash, got: Some(blocks[2].hash) }
        );
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let buffer = ChainStateBuffer::new(3, 2);
        let blocks = chain(&buffer, 3).await;
        let b3 = block(3, &blocks[2], 0);
        buffer.insert_block(b3).await;

        assert_eq!(buffer.get_block_by_hash(blocks[0].hash).await, None);
        let stats = buffer.cache_stats().await;
        assert_eq!(stats.blocks_by_hash_len, 3);
        assert_eq!(stats.capacity, 3);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let buffer = ChainStateBuffer::new(16, 4);
        let blocks = chain(&buffer, 2).await;
        buffer.set_label(BlockNumberOrTag::Finalized, blocks[0].hash).await.unwrap();

        buffer.clear().await;
        assert!(buffer.get_block_by_hash(blocks[1].hash).await.is_none());
        assert_eq!(buffer.canonical_head().await, None);
        assert_eq!(buffer.get_block_by_label(BlockNumberOrTag::Finalized).await, None);
    }
}
