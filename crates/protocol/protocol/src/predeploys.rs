//! Addresses of L2 predeploys and protocol system accounts.

use alloy_primitives::{Address, address};

/// Container for the predeploy contract addresses used by derivation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Predeploys;

impl Predeploys {
    /// The sequencer fee vault proxy address, the fee recipient of every derived block.
    pub const SEQUENCER_FEE_VAULT: Address = address!("0x4200000000000000000000000000000000000011");

    /// The gas price oracle proxy address.
    pub const GAS_PRICE_ORACLE: Address = address!("0x420000000000000000000000000000000000000F");

    /// The L1 block information proxy address, target of the L1 attributes deposit.
    pub const L1_BLOCK_INFO: Address = address!("0x4200000000000000000000000000000000000015");

    /// The L2 proxy admin address.
    pub const PROXY_ADMIN: Address = address!("0x4200000000000000000000000000000000000018");

    /// The base fee vault address.
    pub const BASE_FEE_VAULT: Address = address!("0x4200000000000000000000000000000000000019");

    /// The L1 fee vault address.
    pub const L1_FEE_VAULT: Address = address!("0x420000000000000000000000000000000000001a");

    /// The operator fee vault proxy address.
    pub const OPERATOR_FEE_VAULT: Address = address!("0x420000000000000000000000000000000000001B");

    /// Provides access to L1 beacon block roots (EIP-4788).
    pub const BEACON_BLOCK_ROOT: Address = address!("0x000F3df6D732807Ef1319fB7B8bB8522d0Beac02");

    /// Serves historical block hashes from state (EIP-2935).
    pub const BLOCK_HASH_HISTORY: Address = address!("0x0000F90827F1C53a10cb7A02335B175320002935");
}

/// Container for system addresses that are not predeploy contracts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SystemAddresses;

impl SystemAddresses {
    /// The depositor address of the L1 attributes transaction and of upgrade transactions.
    pub const DEPOSITOR_ACCOUNT: Address = address!("0xDeaDDEaDDeAdDeAdDEAdDEaddeAddEAdDEAd0001");
}
