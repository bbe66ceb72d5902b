//! The unsafe block signer update.

use alloy_primitives::Address;
use alloy_sol_types::{SolType, sol};

use crate::{
    SystemConfigLog, SystemConfigUpdateKind, UpdateDataError, updates::common::update_payload,
};

/// A new key for signing unsafe blocks gossiped by the sequencer.
///
/// The signer is not part of [`crate::SystemConfig`]; runtime configuration reads it from
/// contract storage instead, so applying this update is a no-op.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct UnsafeBlockSignerUpdate {
    /// The new unsafe block signer address.
    pub unsafe_block_signer: Address,
}

impl TryFrom<&SystemConfigLog> for UnsafeBlockSignerUpdate {
    type Error = UpdateDataError;

    fn try_from(log: &SystemConfigLog) -> Result<Self, Self::Error> {
        let payload = update_payload(log, SystemConfigUpdateKind::UnsafeBlockSigner)?;
        let unsafe_block_signer = <sol!(address)>::abi_decode_validate(payload)
            .map_err(|_| UpdateDataError::FieldDecodingError("unsafe block signer"))?;
        Ok(Self { unsafe_block_signer })
    }
}
