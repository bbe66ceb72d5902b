//! Implements the rollup node rpc endpoints. These endpoints serve data about the rollup state.
//!
//! Mirrors the op-node rollup client API.

use alloy_eips::BlockNumberOrTag;
use async_trait::async_trait;
use jsonrpsee::{
    core::RpcResult,
    types::{ErrorCode, ErrorObject, ErrorObjectOwned},
};
use loam_engine::EngineSyncState;
use loam_genesis::RollupConfig;
use loam_protocol::{L2BlockInfo, SyncStatus};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::{
    BlockRefWithStatus, L1State, L1WatcherQueries, L1WatcherQuerySender, RollupNodeApiServer,
};

/// The queries the engine answers.
#[derive(Debug)]
pub enum EngineQueries {
    /// Returns the rollup config.
    Config(oneshot::Sender<Arc<RollupConfig>>),
    /// Returns the current sync state.
    State(oneshot::Sender<EngineSyncState>),
    /// Returns the canonical L2 block ref for a label, with the sync state it was read under.
    BlockRef {
        /// The block to look up.
        block: BlockNumberOrTag,
        /// The reply channel.
        sender: oneshot::Sender<(Option<L2BlockInfo>, EngineSyncState)>,
    },
}

/// The sender half of the engine query channel.
pub type EngineQuerySender = mpsc::Sender<EngineQueries>;

fn internal_error<E>(_: E) -> ErrorObjectOwned {
    ErrorObject::from(ErrorCode::InternalError)
}

/// RollupRpc
///
/// This is a server implementation of [`crate::RollupNodeApiServer`].
#[derive(Debug, Clone)]
pub struct RollupRpc {
    /// The channel to send [`EngineQueries`]s.
    pub engine_sender: EngineQuerySender,
    /// The channel to send [`L1WatcherQueries`]s.
    pub l1_watcher_sender: L1WatcherQuerySender,
}

impl RollupRpc {
    /// The error code returned when a requested block is not known.
    pub const BLOCK_NOT_FOUND_CODE: i32 = -32000;

    /// Constructs a new [`RollupRpc`] given the query channels.
    pub const fn new(
        engine_sender: EngineQuerySender,
        l1_watcher_sender: L1WatcherQuerySender,
    ) -> Self {
        Self { engine_sender, l1_watcher_sender }
    }

    async fn query_engine<T, F>(&self, query: F) -> RpcResult<T>
    where
        F: FnOnce(oneshot::Sender<T>) -> EngineQueries,
    {
        let (tx, rx) = oneshot::channel();
        self.engine_sender.send(query(tx)).await.map_err(internal_error)?;
        rx.await.map_err(internal_error)
    }

    async fn l1_state(&self) -> RpcResult<L1State> {
        let (tx, rx) = oneshot::channel();
        self.l1_watcher_sender.send(L1WatcherQueries::L1State(tx)).await.map_err(internal_error)?;
        rx.await.map_err(internal_error)
    }
}

#[async_trait]
impl RollupNodeApiServer for RollupRpc {
    async fn op_sync_status(&self) -> RpcResult<SyncStatus> {
        loam_macros::inc!(gauge, crate::Metrics::RPC_CALLS, "method" => "optimism_syncStatus");

        let (l1, state) =
            tokio::try_join!(self.l1_state(), self.query_engine(EngineQueries::State))?;
        Ok(state.sync_status(l1.into()))
    }

    async fn op_rollup_config(&self) -> RpcResult<RollupConfig> {
        loam_macros::inc!(gauge, crate::Metrics::RPC_CALLS, "method" => "optimism_rollupConfig");

        let config = self.query_engine(EngineQueries::Config).await?;
        Ok(Arc::unwrap_or_clone(config))
    }

    async fn op_block_ref_with_status(
        &self,
        number: BlockNumberOrTag,
    ) -> RpcResult<BlockRefWithStatus> {
        loam_macros::inc!(
            gauge,
            crate::Metrics::RPC_CALLS,
            "method" => "optimism_blockRefWithStatus"
        );

        let (l1, (block_ref, state)) = tokio::try_join!(
            self.l1_state(),
            self.query_engine(|sender| EngineQueries::BlockRef { block: number, sender })
        )?;
        let Some(block_ref) = block_ref else {
            debug!(target: "rpc", %number, "Block ref not found");
            return Err(ErrorObject::owned(
                Self::BLOCK_NOT_FOUND_CODE,
                format!("block {number} not found"),
                None::<()>,
            ));
        };
        Ok(BlockRefWithStatus { block_ref, status: state.sync_status(l1.into()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use loam_engine::EngineSyncStateUpdate;
    use loam_protocol::BlockInfo;

    fn l2_block(number: u64) -> L2BlockInfo {
        L2BlockInfo {
            block_info: BlockInfo {
                hash: B256::with_last_byte(number as u8),
                number,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn engine_state() -> EngineSyncState {
        EngineSyncState::default().apply_update(EngineSyncStateUpdate {
            unsafe_head: Some(l2_block(9)),
            pending_safe_head: Some(l2_block(6)),
            safe_head: Some(l2_block(5)),
            finalized_head: Some(l2_block(2)),
        })
    }

    fn l1_state() -> L1State {
        L1State {
            head_l1: Some(BlockInfo { number: 40, ..Default::default() }),
            finalized_l1: Some(BlockInfo { number: 30, ..Default::default() }),
            ..Default::default()
        }
    }

    /// Answers engine queries from a fixed state until the channel closes.
    fn spawn_engine(config: RollupConfig) -> EngineQuerySender {
        let (tx, mut rx) = mpsc::channel(8);
        let config = Arc::new(config);
        tokio::spawn(async move {
            let state = engine_state();
            while let Some(query) = rx.recv().await {
                match query {
                    EngineQueries::Config(sender) => {
                        let _ = sender.send(config.clone());
                    }
                    EngineQueries::State(sender) => {
                        let _ = sender.send(state);
                    }
                    EngineQueries::BlockRef { block, sender } => {
                        let found = match block {
                            BlockNumberOrTag::Number(n) if n <= 9 => Some(l2_block(n)),
                            BlockNumberOrTag::Latest => Some(state.unsafe_head()),
                            _ => None,
                        };
                        let _ = sender.send((found, state));
                    }
                }
            }
        });
        tx
    }

    fn spawn_l1_watcher() -> L1WatcherQuerySender {
        let (tx, mut rx) = mpsc::channel(8);
        tokio::spawn(async move {
            while let Some(L1WatcherQueries::L1State(sender)) = rx.recv().await {
                let _ = sender.send(l1_state());
            }
        });
        tx
    }

    fn rpc() -> RollupRpc {
        RollupRpc::new(
            spawn_engine(RollupConfig { l2_chain_id: 10, ..Default::default() }),
            spawn_l1_watcher(),
        )
    }

    #[tokio::test]
    async fn test_sync_status_merges_l1_and_l2() {
        let status = rpc().op_sync_status().await.unwrap();
        assert_eq!(status.head_l1.number, 40);
        assert_eq!(status.finalized_l1.number, 30);
        assert_eq!(status.current_l1, BlockInfo::default());
        assert_eq!(status.unsafe_l2, l2_block(9));
        assert_eq!(status.pending_safe_l2, l2_block(6));
        assert_eq!(status.safe_l2, l2_block(5));
        assert_eq!(status.finalized_l2, l2_block(2));
    }

    #[tokio::test]
    async fn test_rollup_config() {
        let config = rpc().op_rollup_config().await.unwrap();
        assert_eq!(config.l2_chain_id, 10);
    }

    #[tokio::test]
    async fn test_block_ref_with_status() {
        let response = rpc().op_block_ref_with_status(BlockNumberOrTag::Number(4)).await.unwrap();
        assert_eq!(response.block_ref, l2_block(4));
        assert_eq!(response.status.safe_l2, l2_block(5));
        assert_eq!(response.status.head_l1.number, 40);
    }

    #[tokio::test]
    async fn test_block_ref_not_found() {
        let err = rpc().op_block_ref_with_status(BlockNumberOrTag::Number(12)).await.unwrap_err();
        assert_eq!(err.code(), RollupRpc::BLOCK_NOT_FOUND_CODE);
        assert!(err.message().ends_with("not found"));
    }

    #[tokio::test]
    async fn test_engine_gone_is_internal_error() {
        let (engine_sender, engine_receiver) = mpsc::channel(1);
        drop(engine_receiver);
        let rpc = RollupRpc::new(engine_sender, spawn_l1_watcher());

        let err = rpc.op_sync_status().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalError.code());
    }

    #[tokio::test]
    async fn test_registered_method_names() {
        let module = rpc().into_rpc();
        let mut names: Vec<_> = module.method_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            ["optimism_blockRefWithStatus", "optimism_rollupConfig", "optimism_syncStatus"]
        );
    }
}
