//! Module containing a [`TxDeposit`] builder for the Fjord network upgrade transactions.

use alloc::{string::String, vec, vec::Vec};
use alloy_primitives::{Address, B256, TxKind, U256, address};
use alloy_sol_types::SolCall;
use loam_protocol::{Predeploys, SystemAddresses};
use op_alloy_consensus::{TxDeposit, UpgradeDepositSource};

use crate::{
    Hardfork, HardforkError, UpgradeBytecode, artifacts,
    utils::{setFjordCall, upgrade_to_calldata},
};

/// The Fjord network upgrade transactions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fjord;

impl Fjord {
    /// Deployer of the Fjord `GasPriceOracle` implementation.
    pub const GAS_PRICE_ORACLE_DEPLOYER: Address =
        address!("4210000000000000000000000000000000000002");

    /// The Fjord `GasPriceOracle` implementation address.
    pub fn gas_price_oracle_address() -> Address {
        Self::GAS_PRICE_ORACLE_DEPLOYER.create(0)
    }

    /// Returns the source hash for the deployment of the gas price oracle contract.
    pub fn deploy_gas_price_oracle_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Fjord: Gas Price Oracle Deployment") }
            .source_hash()
    }

    /// Returns the source hash for the update of the gas price oracle proxy.
    pub fn update_gas_price_oracle_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Fjord: Gas Price Oracle Proxy Update") }
            .source_hash()
    }

    /// Returns the source hash for the gas price oracle activation.
    pub fn enable_fjord_source() -> B256 {
        UpgradeDepositSource { intent: String::from("Fjord: Gas Price Oracle Set Fjord") }
            .source_hash()
    }
}

impl Hardfork for Fjord {
    fn deposits(&self, bytecode: &UpgradeBytecode) -> Result<Vec<TxDeposit>, HardforkError> {
        Ok(vec![
            TxDeposit {
                source_hash: Self::deploy_gas_price_oracle_source(),
                from: Self::GAS_PRICE_ORACLE_DEPLOYER,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 1_450_000,
                is_system_transaction: false,
                input: artifacts::require(
                    "Fjord GasPriceOracle",
                    &bytecode.fjord_gas_price_oracle,
                )?,
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
                source_hash: Self::enable_fjord_source(),
                from: SystemAddresses::DEPOSITOR_ACCOUNT,
                to: TxKind::Call(Predeploys::GAS_PRICE_ORACLE),
                mint: 0,
                value: U256::ZERO,
                gas_limit: 90_000,
                is_system_transaction: false,
                input: setFjordCall {}.abi_encode().into(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::test_bytecode;
    use alloy_primitives::{hex, keccak256};
    use op_alloy_consensus::DepositSourceDomain;

    #[test]
    fn test_enable_fjord_source_domain() {
        let expected = DepositSourceDomain::Upgrade(UpgradeDepositSource {
            intent: String::from("Fjord: Gas Price Oracle Set Fjord"),
        })
        .source_hash();
        assert_eq!(Fjord::enable_fjord_source(), expected);
    }

    #[test]
    fn test_gas_price_oracle_address() {
        assert_eq!(
            Fjord::gas_price_oracle_address(),
            address!("a919894851548179a0750865e7974da599c0fac7")
        );
    }

    #[test]
    fn test_fjord_deposit_order() {
        let bytecode = test_bytecode();
        let deposits = Fjord.deposits(&bytecode).unwrap();
        assert_eq!(deposits.len(), 3);

        assert_eq!(deposits[0].source_hash, Fjord::deploy_gas_price_oracle_source());
        assert_eq!(deposits[0].to, TxKind::Create);
        assert_eq!(deposits[0].input, bytecode.fjord_gas_price_oracle);

        assert_eq!(deposits[1].source_hash, Fjord::update_gas_price_oracle_source());
        assert_eq!(deposits[1].input, upgrade_to_calldata(Fjord::gas_price_oracle_address()));

        assert_eq!(deposits[2].source_hash, Fjord::enable_fjord_source());
        assert_eq!(deposits[2].from, SystemAddresses::DEPOSITOR_ACCOUNT);
        assert_eq!(deposits[2].input.as_ref(), hex!("8e98b106"));
        assert_eq!(deposits[2].input.as_ref(), &keccak256("setFjord()")[..4]);
    }

    #[test]
    fn test_fjord_requires_implementation_code() {
        assert_eq!(
            Fjord.deposits(&UpgradeBytecode::default()),
            Err(HardforkError::MissingBytecode("Fjord GasPriceOracle"))
        );
    }
}
