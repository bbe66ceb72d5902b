//! The jsonrpsee API definitions served by the rollup node.

use crate::BlockRefWithStatus;
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use loam_genesis::RollupConfig;
use loam_protocol::SyncStatus;

/// The rollup node query API, in the `optimism` namespace.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "optimism"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "optimism"))]
pub trait RollupNodeApi {
    /// Returns the current sync status of the node.
    #[method(name = "syncStatus")]
    async fn op_sync_status(&self) -> RpcResult<SyncStatus>;

    /// Returns the rollup config the node runs with.
    #[method(name = "rollupConfig")]
    async fn op_rollup_config(&self) -> RpcResult<RollupConfig>;

    /// Returns the canonical L2 block ref at `number` together with the sync status it was read
    /// under.
    #[method(name = "blockRefWithStatus")]
    async fn op_block_ref_with_status(
        &self,
        number: BlockNumberOrTag,
    ) -> RpcResult<BlockRefWithStatus>;
}

/// The admin API, in the `admin` namespace.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "admin"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "admin"))]
pub trait AdminApi {
    /// Resets the derivation pipeline.
    #[method(name = "resetDerivationPipeline")]
    async fn admin_reset_derivation_pipeline(&self) -> RpcResult<()>;

    /// Starts the sequencer on top of the given unsafe head.
    #[method(name = "startSequencer")]
    async fn admin_start_sequencer(&self, unsafe_head: B256) -> RpcResult<()>;

    /// Stops the sequencer, returning the hash of the last sequenced block.
    #[method(name = "stopSequencer")]
    async fn admin_stop_sequencer(&self) -> RpcResult<B256>;

    /// Returns whether the sequencer is running.
    #[method(name = "sequencerActive")]
    async fn admin_sequencer_active(&self) -> RpcResult<bool>;

    /// Makes this node the sequencer leader regardless of the conductor.
    #[method(name = "overrideLeader")]
    async fn admin_override_leader(&self) -> RpcResult<()>;
}
