//! Module containing a [`TxDeposit`] builder for the Isthmus network upgrade transactions.

use alloc::{string::String, vec, vec::Vec};
use alloy_primitives::{Address, B256, Bytes, TxKind, U256, address};
use alloy_sol_types::SolCall;
use loam_protocol::{Predeploys, SystemAddresses};
use op_alloy_consensus::{TxDeposit, UpgradeDepositSource};

use crate::{
    Hardfork, HardforkError, UpgradeBytecode, artifacts,
    utils::{decode_bytecode, setIsthmusCall, upgrade_to_calldata},
};

/// The Isthmus network upgrade transactions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Isthmus;

impl Isthmus {
    /// Deployer of the Isthmus `L1Block` implementation.
    pub const L1_BLOCK_DEPLOYER: Address = address!("4210000000000000000000000000000000000003");

    /// Deployer of the Isthmus `GasPriceOracle` implementation.
    pub const GAS_PRICE_ORACLE_DEPLOYER: Address =
        address!("4210000000000000000000000000000000000004");

    /// Deployer of the `OperatorFeeVault` implementation.
    pub const OPERATOR_FEE_VAULT_DEPLOYER: Address =
        address!("4210000000000000000000000000000000000005");

    /// Sender of the EIP-2935 block hash history contract creation. Its nonce-0 create address
    /// is [`Predeploys::BLOCK_HASH_HISTORY`].
    pub const EIP2935_FROM: Address = address!("3462413Af4609098e1E27A490f554f260213D685");

    /// The Isthmus `L1Block` implementation address.
    pub fn l1_block_address() -> Address {
        Self::L1_BLOCK_DEPLOYER.create(0)
    }

    /// The Isthmus `GasPriceOracle` implementation address.
    pub fn gas_price_oracle_address() -> Address {
        Self::GAS_PRICE_ORACLE_DEPLOYER.create(0)
    }

    /// The `OperatorFeeVault` implementation address.
    pub fn operator_fee_vault_address() -> Address {
        Self::OPERATOR_FEE_VAULT_DEPLOYER.create(0)
    }

    fn source(intent: &str) -> B256 {
        UpgradeDepositSource { intent: String::from(intent) }.source_hash()
    }

    /// Returns the source hash for the deployment of the l1 block contract.
    pub fn deploy_l1_block_source() -> B256 {
        Self::source("Isthmus: L1 Block Deployment")
    }

    /// Returns the source hash for the deployment of the gas price oracle contract.
    pub fn deploy_gas_price_oracle_source() -> B256 {
        Self::source("Isthmus: Gas Price Oracle Deployment")
    }

    /// Returns the source hash for the deployment of the operator fee vault contract.
    pub fn deploy_operator_fee_vault_source() -> B256 {
        Self::source("Isthmus: Operator Fee Vault Deployment")
    }

    /// Returns the source hash for the update of the l1 block proxy.
    pub fn update_l1_block_source() -> B256 {
        Self::source("Isthmus: L1 Block Proxy Update")
    }

    /// Returns the source hash for the update of the gas price oracle proxy.
    pub fn update_gas_price_oracle_source() -> B256 {
        Self::source("Isthmus: Gas Price Oracle Proxy Update")
    }

    /// Returns the source hash for the update of the operator fee vault proxy.
    pub fn update_operator_fee_vault_source() -> B256 {
        Self::source("Isthmus: Operator Fee Vault Proxy Update")
    }

    /// Returns the source hash for the gas price oracle activation.
    pub fn enable_isthmus_source() -> B256 {
        Self::source("Isthmus: Gas Price Oracle Set Isthmus")
    }

    /// Returns the source hash for the block hash history contract deployment.
    pub fn block_hash_history_contract_source() -> B256 {
        Self::source("Isthmus: EIP-2935 Contract Deployment")
    }

    /// Returns the EIP-2935 creation data.
    pub fn eip2935_creation_data() -> Result<Bytes, HardforkError> {
        decode_bytecode("EIP-2935", include_str!("./bytecode/eip2935_isthmus.hex"))
    }

    const fn proxy_update(source_hash: B256, proxy: Address, input: Bytes) -> TxDeposit {
        TxDeposit {
            source_hash,
            from: Address::ZERO,
            to: TxKind::Call(proxy),
            mint: 0,
            value: U256::ZERO,
            gas_limit: 50_000,
            is_system_transaction: false,
            input,
        }
    }
}

impl Hardfork for Isthmus {
    fn deposits(&self, bytecode: &UpgradeBytecode) -> Result<Vec<TxDeposit>, HardforkError> {
        Ok(vec![
            TxDeposit {
                source_hash: Self::deploy_l1_block_source(),
                from: Self::L1_BLOCK_DEPLOYER,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 425_000,
                is_system_transaction: false,
                input: artifacts::require("Isthmus L1Block", &bytecode.isthmus_l1_block)?,
            },
            TxDeposit {
                source_hash: Self::deploy_gas_price_oracle_source(),
                from: Self::GAS_PRICE_ORACLE_DEPLOYER,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 1_625_000,
                is_system_transaction: false,
                input: artifacts::require(
                    "Isthmus GasPriceOracle",
                    &bytecode.isthmus_gas_price_oracle,
                )?,
            },
            TxDeposit {
                source_hash: Self::deploy_operator_fee_vault_source(),
                from: Self::OPERATOR_FEE_VAULT_DEPLOYER,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 500_000,
                is_system_transaction: false,
                input: artifacts::require(
                    "Isthmus OperatorFeeVault",
                    &bytecode.isthmus_operator_fee_vault,
                )?,
            },
            Self::proxy_update(
                Self::update_l1_block_source(),
                Predeploys::L1_BLOCK_INFO,
                upgrade_to_calldata(Self::l1_block_address()),
            ),
            Self::proxy_update(
                Self::update_gas_price_oracle_source(),
                Predeploys::GAS_PRICE_ORACLE,
                upgrade_to_calldata(Self::gas_price_oracle_address()),
            ),
            Self::proxy_update(
                Self::update_operator_fee_vault_source(),
                Predeploys::OPERATOR_FEE_VAULT,
                upgrade_to_calldata(Self::operator_fee_vault_address()),
            ),
            TxDeposit {
                source_hash: Self::enable_isthmus_source(),
                from: SystemAddresses::DEPOSITOR_ACCOUNT,
                to: TxKind::Call(Predeploys::GAS_PRICE_ORACLE),
                mint: 0,
                value: U256::ZERO,
                gas_limit: 90_000,
                is_system_transaction: false,
                input: setIsthmusCall {}.abi_encode().into(),
            },
            TxDeposit {
                source_hash: Self::block_hash_history_contract_source(),
                from: Self::EIP2935_FROM,
                to: TxKind::Create,
                mint: 0,
                value: U256::ZERO,
                gas_limit: 250_000,
                is_system_transaction: false,
                input: Self::eip2935_creation_data()?,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::test_bytecode;
    use alloy_primitives::keccak256;

    #[test]
    fn test_block_hash_history_deploys_to_predeploy() {
        assert_eq!(Isthmus::EIP2935_FROM.create(0), Predeploys::BLOCK_HASH_HISTORY);
    }

    #[test]
    fn test_isthmus_deposit_order() {
        let bytecode = test_bytecode();
        let deposits = Isthmus.deposits(&bytecode).unwrap();
        let sources: Vec<_> = deposits.iter().map(|d| d.source_hash).collect();
        assert_eq!(
            sources,
            [
                Isthmus::deploy_l1_block_source(),
                Isthmus::deploy_gas_price_oracle_source(),
                Isthmus::deploy_operator_fee_vault_source(),
                Isthmus::update_l1_block_source(),
                Isthmus::update_gas_price_oracle_source(),
                Isthmus::update_operator_fee_vault_source(),
                Isthmus::enable_isthmus_source(),
                Isthmus::block_hash_history_contract_source(),
            ]
        );

        assert_eq!(deposits[0].input, bytecode.isthmus_l1_block);
        assert_eq!(deposits[1].input, bytecode.isthmus_gas_price_oracle);
        assert_eq!(deposits[2].input, bytecode.isthmus_operator_fee_vault);
        assert_eq!(deposits[5].to, TxKind::Call(Predeploys::OPERATOR_FEE_VAULT));
        assert_eq!(
            deposits[5].input,
            upgrade_to_calldata(Isthmus::OPERATOR_FEE_VAULT_DEPLOYER.create(0))
        );
        assert_eq!(deposits[6].input.as_ref(), &keccak256("setIsthmus()")[..4]);
        assert_eq!(deposits[7].input.len(), 92);
    }

    #[test]
    fn test_isthmus_requires_implementation_code() {
        let bytecode =
            UpgradeBytecode { isthmus_operator_fee_vault: Default::default(), ..test_bytecode() };
        assert_eq!(
            Isthmus.deposits(&bytecode),
            Err(HardforkError::MissingBytecode("Isthmus OperatorFeeVault"))
        );
    }
}
