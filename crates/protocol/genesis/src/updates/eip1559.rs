//! The EIP-1559 update type.

use crate::{
    SystemConfig, SystemConfigLog, SystemConfigUpdateKind, UpdateDataError,
    updates::common::update_payload,
};

/// The EIP-1559 base fee parameters set on L1, consumed from Holocene onwards.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct Eip1559Update {
    /// The EIP-1559 denominator.
    pub eip1559_denominator: u32,
    /// The EIP-1559 elasticity multiplier.
    pub eip1559_elasticity: u32,
}

impl Eip1559Update {
    /// Applies the update to the [`SystemConfig`].
    pub const fn apply(&self, config: &mut SystemConfig) {
        config.eip1559_denominator = Some(self.eip1559_denominator);
        config.eip1559_elasticity = Some(self.eip1559_elasticity);
    }
}

impl TryFrom<&SystemConfigLog> for Eip1559Update {
    type Error = UpdateDataError;

    fn try_from(log: &SystemConfigLog) -> Result<Self, Self::Error> {
        let payload = update_payload(log, SystemConfigUpdateKind::Eip1559)?;

        // The word packs `uint32 denominator ++ uint32 elasticity` into its low eight bytes.
        if payload[..24].iter().any(|b| *b != 0) {
            return Err(UpdateDataError::FieldDecodingError("eip1559 parameters"));
        }
        let mut denominator = [0u8; 4];
        denominator.copy_from_slice(&payload[24..28]);
        let mut elasticity = [0u8; 4];
        elasticity.copy_from_slice(&payload[28..32]);

        Ok(Self {
            eip1559_denominator: u32::from_be_bytes(denominator),
            eip1559_elasticity: u32::from_be_bytes(elasticity),
        })
    }
}
