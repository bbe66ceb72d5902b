//! Module containing a [`TxDeposit`] builder for the Ecotone network upgrade transactions.

use alloc::{string::String, vec, vec::Vec};
use alloy_primitives::{Address, B256, Bytes, TxKind, U256, address};
use alloy_sol_types::SolCall;
use loam_protocol::{Predeploys, SystemAddresses};
use op_alloy_consensus::{TxDeposit, UpgradeDepositSource};

use crate::{
    Hardfork, HardforkError, UpgradeBytecode, artifacts,
    utils::{decode_bytecode, setEcotoneCall, upgrade_to_calldata},
};

/// The Ecotone network upgrade transactions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ecotone;

impl Ecotone {
    /// Deployer of the Ecotone `L1Block` implementation.
    pub const L1_BLOCK_DEPLOYER: Address = address!("4210000000000000000000000000000000000000");

    /// Deployer of the Ecotone `GasPriceOracle` implementation.
    pub const GAS_PRICE_ORACLE_DEPLOYER: Address =
        address!("4210000000000000000000000000000000000001");

    /// Sender of the EIP-4788 beacon roots contract creation. Its nonce-0 create address is
    /// [`Predeploys::BEACON_BLOCK_ROOT`].
    pub const EIP4788_FROM: Address = address!("0B799C86a49DEeb90402691F1041aa3AF2d3C875");

    /// The Ecotone `L1Block` implementation address.
    pub fn l1_block_address() -> Address {
        Self::L1_BLOCK_DEPLOYER.create(0)
    }

    /// The Ecotone `GasPriceOracle` implementation address.
    pub fn gas_price_oracle_address() -> Address {
        Self::GAS_PRICE_ORACLE_DEPLOYER.create(0)
    }

    /// Returns the source hash for the deployment of the l1 block contract.
    pub fn deploy_l1_block_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Ecotone: L1 Block Deployment") }.source_hash()
    }

    /// Returns the source hash for the deployment of the gas price oracle contract.
    pub fn deploy_gas_price_oracle_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Ecotone: Gas Price Oracle Deployment") }
            .source_hash()
    }

    /// Returns the source hash for the update of the l1 block proxy.
    pub fn update_l1_block_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Ecotone: L1 Block Proxy Update") }
            .source_hash()
    }

    /// Returns the source hash for the update of the gas price oracle proxy.
    pub fn update_gas_price_oracle_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Ecotone: Gas Price Oracle Proxy Update") }
            .source_hash()
    }

    /// Returns the source hash for the beacon block roots contract deployment.
    pub fn beacon_roots_source() -> B256 {
        UpgradeDepositSource {
            intent: String::from("Ecotone: beacon block roots contract deployment"),
        }
        .source_hash()
    }

    /// Returns the source hash for the gas price oracle activation.
    pub fn enable_ecotone_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Ecotone: Gas Price Oracle Set Ecotone") }
            .source_hash()
    }

    /// Returns the EIP-4788 creation data.
    pub fn eip4788_creation_data() -> Result<Bytes, HardforkError> {
        decode_bytecode("EIP-4788", include_str!("./bytecode/eip4788_ecotone.hex"))
    }
}

impl Hardfork for Ecotone {
    fn deposits(&self, bytecode: &UpgradeBytecode) -> Result<Vec<TxDeposit>, HardforkError> {
        Ok(vec![
            TxDeposit {
                source_hash: Self::deploy_l1_block_source(),
                from: Self::L1_BLOCK_DEPLOYER,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 375_000,
                is_system_transaction: false,
                input: artifacts::require("Ecotone L1Block", &bytecode.ecotone_l1_block)?,
            },
            TxDeposit {
                source_hash: Self::deploy_gas_price_oracle_source(),
                from: Self::GAS_PRICE_ORACLE_DEPLOYER,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 1_000_000,
                is_system_transaction: false,
                input: artifacts::require(
                    "Ecotone GasPriceOracle",
                    &bytecode.ecotone_gas_price_oracle,
                )?,
            },
            TxDeposit {
                source_hash: Self::update_l1_block_source(),
                from: Address::ZERO,
                to: TxKind::Call(Predeploys::L1_BLOCK_INFO),
                mint: 0,
                value: U256::ZERO,
                gas_limit: 50_000,
                is_system_transaction: false,
                input: upgrade_to_calldata(Self::l1_block_address()),
            },
            TxDeposit {
                source_hash: Self::update_gas_price_oracle_source(),
                from: Address::ZERO,
                to: TxKind::Call(Predeploys::GAS_PRICE_ORACLE),
                mint: 0,
                value: U256::ZERO,
                gas_limit: 50_000,
                is_system_transaction: false,
                input: upgrade_to_calldata(Self::gas_price_oracle_address()),
            },
            TxDeposit {
                source_hash: Self::enable_ecotone_source(),
                from: SystemAddresses::DEPOSITOR_ACCOUNT,
                to: TxKind::Call(Predeploys::GAS_PRICE_ORACLE),
                mint: 0,
                value: U256::ZERO,
                gas_limit: 80_000,
                is_system_transaction: false,
                input: setEcotoneCall {}.abi_encode().into(),
            },
            TxDeposit {
                source_hash: Self::beacon_roots_source(),
                from: Self::EIP4788_FROM,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 250_000,
                is_system_transaction: false,
                input: Self::eip4788_creation_data()?,
            },
        ])
    }
}
