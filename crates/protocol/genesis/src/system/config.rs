//! Contains the [`SystemConfig`] type.

use alloy_consensus::{Eip658Value, Receipt};
use alloy_primitives::{Address, B64, Log, U256};

use crate::{
    CONFIG_UPDATE_TOPIC, RollupConfig, SystemConfigLog, SystemConfigUpdateError,
    SystemConfigUpdateKind,
};

/// The L1-governed parameters of the rollup.
///
/// Changes arrive as `ConfigUpdate` logs of the system config contract and take effect for
/// L2 blocks whose L1 origin includes the log.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct SystemConfig {
    /// Batcher address
    #[cfg_attr(feature = "serde", serde(rename = "batcherAddr", alias = "batcherAddress"))]
    pub batcher_address: Address,
    /// Fee overhead value
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_u256_full"))]
    pub overhead: U256,
    /// Fee scalar value
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_u256_full"))]
    pub scalar: U256,
    /// Gas limit value
    pub gas_limit: u64,
    /// Base fee scalar value
    pub base_fee_scalar: Option<u64>,
    /// Blob base fee scalar value
    pub blob_base_fee_scalar: Option<u64>,
    /// EIP-1559 denominator
    pub eip1559_denominator: Option<u32>,
    /// EIP-1559 elasticity
    pub eip1559_elasticity: Option<u32>,
    /// The operator fee scalar (isthmus hardfork)
    pub operator_fee_scalar: Option<u32>,
    /// The operator fee constant (isthmus hardfork)
    pub operator_fee_constant: Option<u64>,
}

impl SystemConfig {
    /// Filters L1 receipts for config updates emitted by `l1_system_config_address` and applies
    /// them in order.
    ///
    /// Receipts of failed transactions are skipped. Returns `true` if any update was applied.
    pub fn update_with_receipts(
        &mut self,
        receipts: &[Receipt],
        l1_system_config_address: Address,
        ecotone_active: bool,
    ) -> Result<bool, SystemConfigUpdateError> {
        let mut updated = false;
        for receipt in receipts {
            if Eip658Value::Eip658(false) == receipt.status {
                continue;
            }

            for log in &receipt.logs {
                let is_config_update = log.address == l1_system_config_address &&
                    log.topics().first() == Some(&CONFIG_UPDATE_TOPIC);
                if is_config_update {
                    self.process_config_update_log(log, ecotone_active)?;
                    updated = true;
                }
            }
        }
        Ok(updated)
    }

    /// Returns the EIP-1559 parameters to place in payload attributes for a block at
    /// `next_timestamp`, encoded as `denominator ++ elasticity`.
    ///
    /// `None` before Holocene. The first Holocene block gets zeroes, which tells the execution
    /// layer to keep the Canyon base fee parameters.
    pub fn eip_1559_params(
        &self,
        rollup_config: &RollupConfig,
        parent_timestamp: u64,
        next_timestamp: u64,
    ) -> Option<B64> {
        let is_holocene = rollup_config.is_holocene_active(next_timestamp);

        if is_holocene && !rollup_config.is_holocene_active(parent_timestamp) {
            return Some(B64::ZERO);
        }
        is_holocene.then(|| {
            let mut params = [0u8; 8];
            params[..4].copy_from_slice(&self.eip1559_denominator.unwrap_or_default().to_be_bytes());
            params[4..].copy_from_slice(&self.eip1559_elasticity.unwrap_or_default().to_be_bytes());
            B64::from(params)
        })
    }

    /// Decodes a `ConfigUpdate` log and applies it.
    fn process_config_update_log(
        &mut self,
        log: &Log,
        ecotone_active: bool,
    ) -> Result<SystemConfigUpdateKind, SystemConfigUpdateError> {
        let update = SystemConfigLog::new(log.clone(), ecotone_active).build()?;
        update.apply(self);
        Ok(update.kind())
    }
}

/// Serializes a [`U256`] as a full 32-byte word.
#[cfg(feature = "serde")]
fn serialize_u256_full<S>(value: &U256, ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::Serialize;

    alloy_primitives::B256::from(value.to_be_bytes::<32>()).serialize(ser)
}
