//! Contains all hardforks represented in the [`crate::Hardfork`] type.

use alloc::vec::Vec;
use alloy_primitives::Bytes;
use loam_genesis::ForkName;

use crate::{Ecotone, Fjord, Hardfork, HardforkError, Isthmus, UpgradeBytecode};

/// Optimism Hardforks
///
/// Exposes the upgrade transactions of every fork that injects any.
///
/// ```rust
/// use alloy_primitives::Bytes;
/// use loam_hardforks::{Hardfork, Hardforks, UpgradeBytecode};
/// let bytecode = UpgradeBytecode {
///     fjord_gas_price_oracle: Bytes::from_static(&[0x60, 0x80]),
///     ..Default::default()
/// };
/// let fjord_upgrade_txs = Hardforks::FJORD.txs(&bytecode).unwrap();
/// assert_eq!(fjord_upgrade_txs.len(), 3);
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct Hardforks;

impl Hardforks {
    /// The Ecotone hardfork upgrade transactions.
    pub const ECOTONE: Ecotone = Ecotone;

    /// The Fjord hardfork upgrade transactions.
    pub const FJORD: Fjord = Fjord;

    /// The Isthmus hardfork upgrade transactions.
    pub const ISTHMUS: Isthmus = Isthmus;

    /// Returns the encoded upgrade transactions of `fork`. Forks without upgrade transactions
    /// yield an empty list.
    pub fn upgrade_txs(
        fork: ForkName,
        bytecode: &UpgradeBytecode,
    ) -> Result<Vec<Bytes>, HardforkError> {
        match fork {
            ForkName::Ecotone => Self::ECOTONE.txs(bytecode),
            ForkName::Fjord => Self::FJORD.txs(bytecode),
            ForkName::Isthmus => Self::ISTHMUS.txs(bytecode),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::test_bytecode;
    use rstest::rstest;

    #[rstest]
    #[case(ForkName::Regolith, 0)]
    #[case(ForkName::Canyon, 0)]
    #[case(ForkName::Delta, 0)]
    #[case(ForkName::Ecotone, 6)]
    #[case(ForkName::Fjord, 3)]
    #[case(ForkName::Granite, 0)]
    #[case(ForkName::Holocene, 0)]
    #[case(ForkName::Isthmus, 8)]
    #[case(ForkName::Jovian, 0)]
    fn test_upgrade_tx_counts(#[case] fork: ForkName, #[case] count: usize) {
        assert_eq!(Hardforks::upgrade_txs(fork, &test_bytecode()).unwrap().len(), count);
    }

    #[rstest]
    #[case::ecotone(ForkName::Ecotone)]
    #[case::fjord(ForkName::Fjord)]
    #[case::isthmus(ForkName::Isthmus)]
    fn test_upgrade_txs_require_bytecode(#[case] fork: ForkName) {
        assert!(matches!(
            Hardforks::upgrade_txs(fork, &UpgradeBytecode::default()),
            Err(HardforkError::MissingBytecode(_))
        ));
    }

    #[test]
    fn test_forks_without_deposits_ignore_bytecode() {
        assert!(Hardforks::upgrade_txs(ForkName::Granite, &UpgradeBytecode::default())
            .unwrap()
            .is_empty());
    }
}
