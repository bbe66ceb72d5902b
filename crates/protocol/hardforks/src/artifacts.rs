//! Creation code of the predeploy implementations deployed by network upgrades.

use alloy_primitives::Bytes;

use crate::HardforkError;

/// Creation code of every predeploy implementation a network upgrade deploys.
///
/// The code is the compiled contracts-bedrock artifact for each release and is supplied by the
/// node operator. Upgrades that only deploy the fixed EIP-4788 and EIP-2935 contracts do not
/// read from here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UpgradeBytecode {
    /// The Ecotone `L1Block` implementation.
    pub ecotone_l1_block: Bytes,
    /// The Ecotone `GasPriceOracle` implementation.
    pub ecotone_gas_price_oracle: Bytes,
    /// The Fjord `GasPriceOracle` implementation.
    pub fjord_gas_price_oracle: Bytes,
    /// The Isthmus `L1Block` implementation.
    pub isthmus_l1_block: Bytes,
    /// The Isthmus `GasPriceOracle` implementation.
    pub isthmus_gas_price_oracle: Bytes,
    /// The Isthmus `OperatorFeeVault` implementation.
    pub isthmus_operator_fee_vault: Bytes,
}

/// Returns `code`, or [`HardforkError::MissingBytecode`] when none was supplied.
pub(crate) fn require(name: &'static str, code: &Bytes) -> Result<Bytes, HardforkError> {
    if code.is_empty() {
        return Err(HardforkError::MissingBytecode(name));
    }
    Ok(code.clone())
}

/// Distinct stand-in creation code for every implementation.
#[cfg(test)]
pub(crate) fn test_bytecode() -> UpgradeBytecode {
    UpgradeBytecode {
        ecotone_l1_block: Bytes::from_static(&[0x60, 0x01]),
        ecotone_gas_price_oracle: Bytes::from_static(&[0x60, 0x02]),
        fjord_gas_price_oracle: Bytes::from_static(&[0x60, 0x03]),
        isthmus_l1_block: Bytes::from_static(&[0x60, 0x04]),
        isthmus_gas_price_oracle: Bytes::from_static(&[0x60, 0x05]),
        isthmus_operator_fee_vault: Bytes::from_static(&[0x60, 0x06]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_empty_code() {
        let bytecode = UpgradeBytecode::default();
        assert_eq!(
            require("Ecotone L1Block", &bytecode.ecotone_l1_block),
            Err(HardforkError::MissingBytecode("Ecotone L1Block"))
        );
        assert_eq!(require("code", &Bytes::from_static(&[0x60])), Ok(Bytes::from_static(&[0x60])));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_upgrade_bytecode() {
        let raw = r#"{
            "ecotoneL1Block": "0x6001",
            "ecotoneGasPriceOracle": "0x6002",
            "fjordGasPriceOracle": "0x6003",
            "isthmusL1Block": "0x6004",
            "isthmusGasPriceOracle": "0x6005",
            "isthmusOperatorFeeVault": "0x6006"
        }"#;
        let bytecode: UpgradeBytecode = serde_json::from_str(raw).unwrap();
        assert_eq!(bytecode.fjord_gas_price_oracle, Bytes::from_static(&[0x60, 0x03]));
        assert_eq!(bytecode.isthmus_operator_fee_vault, Bytes::from_static(&[0x60, 0x06]));
    }
}
