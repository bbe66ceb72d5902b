//! The gas config update type.

use alloy_primitives::U256;
use alloy_sol_types::{SolType, sol};

use crate::{
    RollupConfig, SystemConfig, SystemConfigLog, SystemConfigUpdateKind, UpdateDataError,
    updates::common::update_payload,
};

/// The gas config update type.
///
/// Both fields are `None` when a post-Ecotone scalar fails validation: the update is then
/// ignored and the previous values are retained.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct GasConfigUpdate {
    /// The scalar.
    pub scalar: Option<U256>,
    /// The overhead.
    pub overhead: Option<U256>,
}

impl GasConfigUpdate {
    /// Applies the update to the [`SystemConfig`].
    pub const fn apply(&self, config: &mut SystemConfig) {
        if let Some(scalar) = self.scalar {
            config.scalar = scalar;
        }
        if let Some(overhead) = self.overhead {
            config.overhead = overhead;
        }
    }
}

impl TryFrom<&SystemConfigLog> for GasConfigUpdate {
    type Error = UpdateDataError;

    fn try_from(sys_log: &SystemConfigLog) -> Result<Self, Self::Error> {
        let payload = update_payload(sys_log, SystemConfigUpdateKind::GasConfig)?;
        let overhead = <sol!(uint256)>::abi_decode_validate(&payload[..32])
            .map_err(|_| UpdateDataError::FieldDecodingError("overhead"))?;
        let scalar = <sol!(uint256)>::abi_decode_validate(&payload[32..])
            .map_err(|_| UpdateDataError::FieldDecodingError("scalar"))?;

        if !sys_log.ecotone_active {
            return Ok(Self { scalar: Some(scalar), overhead: Some(overhead) });
        }
        if RollupConfig::check_ecotone_l1_system_config_scalar(scalar.to_be_bytes()).is_err() {
            return Ok(Self::default());
        }
        Ok(Self { scalar: Some(scalar), overhead: Some(U256::ZERO) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updates::common::tests::log_of;
    use alloy_primitives::{hex, uint};

    const BABE_BEEF: [u8; 128] = hex!("00000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000040000000000000000000000000000000000000000000000000000000000000babe000000000000000000000000000000000000000000000000000000000000beef");

    #[test]
    fn test_gas_config_update_try_from() {
        let log = log_of(SystemConfigUpdateKind::GasConfig, &BABE_BEEF, false);
        let update = GasConfigUpdate::try_from(&log).unwrap();

        assert_eq!(update.overhead, Some(uint!(0xbabe_U256)));
        assert_eq!(update.scalar, Some(uint!(0xbeef_U256)));
    }

    #[test]
    fn test_gas_config_update_ecotone_zeroes_overhead() {
        let log = log_of(SystemConfigUpdateKind::GasConfig, &BABE_BEEF, true);
        let update = GasConfigUpdate::try_from(&log).unwrap();

        assert_eq!(update.overhead, Some(U256::ZERO));
        assert_eq!(update.scalar, Some(uint!(0xbeef_U256)));
    }

    #[test]
    fn test_gas_config_update_ecotone_invalid_scalar_is_ignored() {
        let data = hex!("00000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000040000000000000000000000000000000000000000000000000000000000000babe020000000000000000000000000000000000000000000000000000000000beef");
        let log = log_of(SystemConfigUpdateKind::GasConfig, &data, true);
        let update = GasConfigUpdate::try_from(&log).unwrap();
        assert_eq!(update, GasConfigUpdate::default());

        let mut config = SystemConfig { scalar: U256::from(7), ..Default::default() };
        update.apply(&mut config);
        assert_eq!(config.scalar, U256::from(7));
    }
}
