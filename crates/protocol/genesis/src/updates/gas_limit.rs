//! The gas limit update type.

use alloy_sol_types::{SolType, sol};

use crate::{
    SystemConfig, SystemConfigLog, SystemConfigUpdateKind, UpdateDataError,
    updates::common::update_payload,
};

/// The gas limit update type.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct GasLimitUpdate {
    /// The gas limit.
    pub gas_limit: u64,
}

impl GasLimitUpdate {
    /// Applies the update to the [`SystemConfig`].
    pub const fn apply(&self, config: &mut SystemConfig) {
        config.gas_limit = self.gas_limit;
    }
}

impl TryFrom<&SystemConfigLog> for GasLimitUpdate {
    type Error = UpdateDataError;

    fn try_from(log: &SystemConfigLog) -> Result<Self, Self::Error> {
        let payload = update_payload(log, SystemConfigUpdateKind::GasLimit)?;
        let gas_limit = <sol!(uint64)>::abi_decode_validate(payload)
            .map_err(|_| UpdateDataError::FieldDecodingError("gas limit"))?;
        Ok(Self { gas_limit })
    }
}
