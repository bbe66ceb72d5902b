//! Test fixtures for L2 blocks and L1 info calldata.

use alloc::vec;
use alloy_consensus::{BlockBody, Header, Sealable};
use alloy_primitives::{B256, Bytes, hex};
use op_alloy_consensus::{OpBlock, OpTxEnvelope, TxDeposit};

use crate::{L1BlockInfoBedrock, L1BlockInfoEcotone, L1BlockInfoIsthmus, Predeploys, SystemAddresses};

/// Bedrock L1 info calldata from an OP mainnet block.
pub const RAW_BEDROCK_INFO_TX: [u8; L1BlockInfoBedrock::L1_INFO_TX_LEN] = hex!(
    "015d8eb9000000000000000000000000000000000000000000000000000000000117c4eb0000000000000000000000000000000000000000000000000000000065280377000000000000000000000000000000000000000000000000000000026d05d953392012032675be9f94aae5ab442de73c5f4fb1bf30fa7dd0d2442239899a40fc00000000000000000000000000000000000000000000000000000000000000040000000000000000000000006887246668a3b87f54deb3b94ba47a6f63f3298500000000000000000000000000000000000000000000000000000000000000bc00000000000000000000000000000000000000000000000000000000000a6fe0"
);

/// Ecotone L1 info calldata from an OP mainnet block.
pub const RAW_ECOTONE_INFO_TX: [u8; L1BlockInfoEcotone::L1_INFO_TX_LEN] = hex!(
    "440a5e2000000558000c5fc5000000000000000500000000661c277300000000012bec20000000000000000000000000000000000000000000000000000000026e9f109900000000000000000000000000000000000000000000000000000000000000011c4c84c50740386c7dc081efddd644405f04cde73e30a2e381737acce9f5add30000000000000000000000006887246668a3b87f54deb3b94ba47a6f63f32985"
);

/// Isthmus L1 info calldata: the Ecotone fixture with operator fee fields appended.
pub const RAW_ISTHMUS_INFO_TX: [u8; L1BlockInfoIsthmus::L1_INFO_TX_LEN] = hex!(
    "098999be00000558000c5fc5000000000000000500000000661c277300000000012bec20000000000000000000000000000000000000000000000000000000026e9f109900000000000000000000000000000000000000000000000000000000000000011c4c84c50740386c7dc081efddd644405f04cde73e30a2e381737acce9f5add30000000000000000000000006887246668a3b87f54deb3b94ba47a6f63f329850000abcd000000000000dcba"
);

/// Builds an L2 block whose only transaction is an L1 info deposit carrying `calldata`.
pub fn l2_block_with_deposit(
    number: u64,
    timestamp: u64,
    parent_hash: B256,
    calldata: &[u8],
) -> OpBlock {
    let deposit = TxDeposit {
        from: SystemAddresses::DEPOSITOR_ACCOUNT,
        to: Predeploys::L1_BLOCK_INFO.into(),
        gas_limit: 1_000_000,
        input: Bytes::copy_from_slice(calldata),
        ..Default::default()
    };
    OpBlock {
        header: Header { number, timestamp, parent_hash, ..Default::default() },
        body: BlockBody {
            transactions: vec![OpTxEnvelope::Deposit(deposit.seal_slow())],
            ommers: vec![],
            withdrawals: None,
        },
    }
}
