//! The batcher update type.

use alloy_primitives::Address;
use alloy_sol_types::{SolType, sol};

use crate::{
    SystemConfig, SystemConfigLog, SystemConfigUpdateKind, UpdateDataError,
    updates::common::update_payload,
};

/// The batcher update type.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct BatcherUpdate {
    /// The batcher address.
    pub batcher_address: Address,
}

impl BatcherUpdate {
    /// Applies the update to the [`SystemConfig`].
    pub const fn apply(&self, config: &mut SystemConfig) {
        config.batcher_address = self.batcher_address;
    }
}

impl TryFrom<&SystemConfigLog> for BatcherUpdate {
    type Error = UpdateDataError;

    fn try_from(log: &SystemConfigLog) -> Result<Self, Self::Error> {
        let payload = update_payload(log, SystemConfigUpdateKind::Batcher)?;
        let batcher_address = <sol!(address)>::abi_decode_validate(payload)
            .map_err(|_| UpdateDataError::FieldDecodingError("batcher address"))?;
        Ok(Self { batcher_address })
    }
}
