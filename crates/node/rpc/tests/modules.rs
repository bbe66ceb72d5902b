//! Exercises the merged rpc modules through their JSON interface.

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::B256;
use jsonrpsee::{RpcModule, core::EmptyServerParams};
use loam_engine::{EngineSyncState, EngineSyncStateUpdate};
use loam_genesis::RollupConfig;
use loam_protocol::{BlockInfo, L2BlockInfo};
use loam_rpc::{
    AdminApiServer, AdminRpc, EngineQueries, L1State, L1WatcherQueries, RollupNodeApiServer,
    RollupRpc, SequencerAdminQuery,
};
use rstest::*;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

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

fn spawn_node(sequencer: bool) -> RpcModule<()> {
    let (engine_tx, mut engine_rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let state = EngineSyncState::default().apply_update(EngineSyncStateUpdate {
            unsafe_head: Some(l2_block(3)),
            safe_head: Some(l2_block(2)),
            ..Default::default()
        });
        let config = Arc::new(RollupConfig { l2_chain_id: 10, ..Default::default() });
        while let Some(query) = engine_rx.recv().await {
            match query {
                EngineQueries::Config(sender) => {
                    let _ = sender.send(config.clone());
                }
                EngineQueries::State(sender) => {
                    let _ = sender.send(state);
                }
                EngineQueries::BlockRef { block, sender } => {
                    let found = block.as_number().filter(|n| *n <= 3).map(l2_block);
                    let _ = sender.send((found, state));
                }
            }
        }
    });

    let (l1_tx, mut l1_rx) = mpsc::channel(8);
    tokio::spawn(async move {
        while let Some(L1WatcherQueries::L1State(sender)) = l1_rx.recv().await {
            let head_l1 = Some(BlockInfo { number: 20, ..Default::default() });
            let _ = sender.send(L1State { head_l1, ..Default::default() });
        }
    });

    let sequencer_sender = sequencer.then(|| {
        let (tx, mut rx) = mpsc::channel(8);
        tokio::spawn(async move {
            while let Some(query) = rx.recv().await {
                if let SequencerAdminQuery::SequencerActive(sender) = query {
                    let _ = sender.send(true);
                }
            }
        });
        tx
    });

    let mut module = RpcModule::new(());
    module.merge(RollupRpc::new(engine_tx, l1_tx).into_rpc()).unwrap();
    module.merge(AdminRpc::new(sequencer_sender).into_rpc()).unwrap();
    module
}

#[rstest]
#[tokio::test]
async fn test_sync_status_wire_format() {
    let module = spawn_node(false);
    let status: Value =
        module.call("optimism_syncStatus", EmptyServerParams::new()).await.unwrap();

    assert_eq!(status["head_l1"]["number"], 20);
    assert_eq!(status["unsafe_l2"]["number"], 3);
    assert_eq!(status["safe_l2"]["number"], 2);
    assert!(status.get("pending_safe_l2").is_some());
}

#[rstest]
#[tokio::test]
async fn test_block_ref_with_status_wire_format() {
    let module = spawn_node(false);
    let response: Value = module
        .call("optimism_blockRefWithStatus", [BlockNumberOrTag::Number(1)])
        .await
        .unwrap();

    assert_eq!(response["blockRef"]["number"], 1);
    assert_eq!(response["status"]["unsafe_l2"]["number"], 3);

    let missing = module
        .call::<_, Value>("optimism_blockRefWithStatus", [BlockNumberOrTag::Number(9)])
        .await;
    assert!(missing.is_err());
}

#[rstest]
#[tokio::test]
async fn test_rollup_config_wire_format() {
    let module = spawn_node(false);
    let config: Value =
        module.call("optimism_rollupConfig", EmptyServerParams::new()).await.unwrap();
    assert_eq!(config["l2_chain_id"], 10);
}

#[rstest]
#[case::validator(false)]
#[case::sequencer(true)]
#[tokio::test]
async fn test_admin_sequencer_active(#[case] sequencer: bool) {
    let module = spawn_node(sequencer);
    let active = module.call::<_, bool>("admin_sequencerActive", EmptyServerParams::new()).await;
    assert_eq!(active.is_ok(), sequencer);
}
