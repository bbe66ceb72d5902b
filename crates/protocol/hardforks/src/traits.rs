//! The [`Hardfork`] trait.

use alloc::vec::Vec;
use alloy_primitives::Bytes;
use op_alloy_consensus::TxDeposit;

use crate::{HardforkError, UpgradeBytecode, utils::encode_deposit};

/// A network upgrade that injects deposit transactions into its activation block.
pub trait Hardfork {
    /// Returns the upgrade deposits, in the order they are included.
    fn deposits(&self, bytecode: &UpgradeBytecode) -> Result<Vec<TxDeposit>, HardforkError>;

    /// Returns the EIP-2718 encoded upgrade transactions.
    fn txs(&self, bytecode: &UpgradeBytecode) -> Result<Vec<Bytes>, HardforkError> {
        Ok(self.deposits(bytecode)?.into_iter().map(encode_deposit).collect())
    }
}
