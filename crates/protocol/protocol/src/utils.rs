//! Utility methods used by protocol types.

use alloy_consensus::Typed2718;
use alloy_primitives::B256;
use loam_genesis::{RollupConfig, SystemConfig};
use op_alloy_consensus::{EIP1559ParamError, OpBlock, decode_holocene_extra_data};

use crate::{DecodeError, L1BlockInfoTx};

/// An error encountered when rebuilding a [`SystemConfig`] from an L2 block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpBlockConversionError {
    /// The genesis block hash does not match. Arguments are the expected and actual hashes.
    #[error("invalid genesis hash. expected {0}, got {1}")]
    InvalidGenesisHash(B256, B256),
    /// The rollup config carries no genesis system config.
    #[error("missing system config in the genesis block")]
    MissingSystemConfigGenesis,
    /// The block has no transactions.
    #[error("empty transactions in block {0}")]
    EmptyTransactions(B256),
    /// The first transaction is not a deposit.
    #[error("first transaction is not a deposit, type: {0}")]
    InvalidTxType(u8),
    /// The L1 info deposit could not be decoded.
    #[error("failed to decode the L1 info deposit: {0}")]
    L1InfoDecode(#[from] DecodeError),
    /// The EIP-1559 parameters in the header extra data could not be decoded.
    #[error("failed to decode the EIP-1559 parameters: {0}")]
    Eip1559Decode(#[from] EIP1559ParamError),
}

/// Rebuilds the [`SystemConfig`] an L2 block was built with.
///
/// Outside of genesis, the batcher and fee scalars come from the L1 info deposit, the gas limit
/// from the header, and post-Holocene EIP-1559 parameters from the header extra data.
pub fn to_system_config(
    block: &OpBlock,
    rollup_config: &RollupConfig,
) -> Result<SystemConfig, OpBlockConversionError> {
    let genesis = &rollup_config.genesis;
    if block.header.number == genesis.l2.number {
        let hash = block.header.hash_slow();
        if hash != genesis.l2.hash {
            return Err(OpBlockConversionError::InvalidGenesisHash(genesis.l2.hash, hash));
        }
        return genesis.system_config.ok_or(OpBlockConversionError::MissingSystemConfigGenesis);
    }

    let Some(first) = block.body.transactions.first() else {
        return Err(OpBlockConversionError::EmptyTransactions(block.header.hash_slow()));
    };
    let Some(deposit) = first.as_deposit() else {
        return Err(OpBlockConversionError::InvalidTxType(first.ty()));
    };
    let l1_info = L1BlockInfoTx::decode_calldata(deposit.input.as_ref())?;

    let mut cfg = SystemConfig {
        batcher_address: l1_info.batcher_address(),
        overhead: l1_info.l1_fee_overhead(),
        scalar: l1_info.l1_fee_scalar(),
        gas_limit: block.header.gas_limit,
        ..Default::default()
    };

    if rollup_config.is_holocene_active(block.header.timestamp) {
        let (elasticity, denominator) = decode_holocene_extra_data(&block.header.extra_data)?;
        cfg.eip1559_denominator = Some(denominator);
        cfg.eip1559_elasticity = Some(elasticity);
    }

    if rollup_config.is_isthmus_active(block.header.timestamp) {
        cfg.operator_fee_scalar = Some(l1_info.operator_fee_scalar());
        cfg.operator_fee_constant = Some(l1_info.operator_fee_constant());
    }

    Ok(cfg)
}
