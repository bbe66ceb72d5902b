//! The operator fee update type.

use crate::{
    SystemConfig, SystemConfigLog, SystemConfigUpdateKind, UpdateDataError,
    updates::common::update_payload,
};

/// The operator fee parameters introduced by Isthmus.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct OperatorFeeUpdate {
    /// The operator fee scalar.
    pub operator_fee_scalar: u32,
    /// The operator fee constant.
    pub operator_fee_constant: u64,
}

impl OperatorFeeUpdate {
    /// Applies the update to the [`SystemConfig`].
    pub const fn apply(&self, config: &mut SystemConfig) {
        config.operator_fee_scalar = Some(self.operator_fee_scalar);
        config.operator_fee_constant = Some(self.operator_fee_constant);
    }
}

impl TryFrom<&SystemConfigLog> for OperatorFeeUpdate {
    type Error = UpdateDataError;

    fn try_from(log: &SystemConfigLog) -> Result<Self, Self::Error> {
        let payload = update_payload(log, SystemConfigUpdateKind::OperatorFee)?;

        // | Bytes    | Variable          |
        // |----------|-------------------|
        // | 0 .. 20  | zero padding      |
        // | 20 .. 24 | uint32 scalar     |
        // | 24 .. 32 | uint64 constant   |
        if payload[..20].iter().any(|b| *b != 0) {
            return Err(UpdateDataError::FieldDecodingError("operator fee parameters"));
        }
        let mut scalar = [0u8; 4];
        scalar.copy_from_slice(&payload[20..24]);
        let mut constant = [0u8; 8];
        constant.copy_from_slice(&payload[24..32]);

        Ok(Self {
            operator_fee_scalar: u32::from_be_bytes(scalar),
            operator_fee_constant: u64::from_be_bytes(constant),
        })
    }
}
