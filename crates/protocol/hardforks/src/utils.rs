//! Utilities for creating hardforks.

use alloc::vec::Vec;
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, hex};
use alloy_sol_types::{SolCall, sol};
use op_alloy_consensus::TxDeposit;

use crate::HardforkError;

sol! {
    /// Points a predeploy proxy at a new implementation.
    function upgradeTo(address implementation);
    /// Switches the gas price oracle to the Ecotone fee formula.
    function setEcotone();
    /// Switches the gas price oracle to the Fjord fee formula.
    function setFjord();
    /// Switches the gas price oracle to the Isthmus fee formula.
    function setIsthmus();
}

/// Decodes creation code embedded as newline-wrapped hex.
pub(crate) fn decode_bytecode(name: &'static str, raw: &str) -> Result<Bytes, HardforkError> {
    hex::decode(raw.trim().replace('\n', ""))
        .map(Bytes::from)
        .map_err(|e| HardforkError::InvalidBytecode(name, e))
}

/// Returns the proxy calldata that upgrades it to `implementation`.
pub(crate) fn upgrade_to_calldata(implementation: Address) -> Bytes {
    upgradeToCall { implementation }.abi_encode().into()
}

/// Encodes a deposit as an EIP-2718 typed transaction.
pub(crate) fn encode_deposit(tx: TxDeposit) -> Bytes {
    let mut encoded = Vec::new();
    tx.encode_2718(&mut encoded);
    Bytes::from(encoded)
}
