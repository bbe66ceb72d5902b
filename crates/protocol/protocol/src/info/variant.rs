//! Contains the `L1BlockInfoTx` enum, containing different variants of the L1 block info
//! transaction.

use alloy_eips::BlockNumHash;
use alloy_primitives::{Address, B256, Bytes, U256};

use super::read_array;
use crate::{DecodeError, L1BlockInfoBedrock, L1BlockInfoEcotone, L1BlockInfoIsthmus};

/// The [`L1BlockInfoTx`] enum contains variants for the different versions of the L1 block info
/// transaction.
///
/// This transaction always sits at the top of an L2 block and names the block's L1 origin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum L1BlockInfoTx {
    /// A Bedrock L1 info transaction
    Bedrock(L1BlockInfoBedrock),
    /// An Ecotone L1 info transaction
    Ecotone(L1BlockInfoEcotone),
    /// An Isthmus L1 info transaction
    Isthmus(L1BlockInfoIsthmus),
}

impl L1BlockInfoTx {
    /// Decodes the [`L1BlockInfoTx`] object from Ethereum transaction calldata.
    pub fn decode_calldata(r: &[u8]) -> Result<Self, DecodeError> {
        if r.len() < 4 {
            return Err(DecodeError::MissingSelector);
        }
        let selector: [u8; 4] = read_array(r, 0);
        match selector {
            L1BlockInfoBedrock::L1_INFO_TX_SELECTOR => {
                L1BlockInfoBedrock::decode_calldata(r).map(Self::Bedrock)
            }
            L1BlockInfoEcotone::L1_INFO_TX_SELECTOR => {
                L1BlockInfoEcotone::decode_calldata(r).map(Self::Ecotone)
            }
            L1BlockInfoIsthmus::L1_INFO_TX_SELECTOR => {
                L1BlockInfoIsthmus::decode_calldata(r).map(Self::Isthmus)
            }
            _ => Err(DecodeError::InvalidSelector),
        }
    }

    /// Encodes the [`L1BlockInfoTx`] object into Ethereum transaction calldata.
    pub fn encode_calldata(&self) -> Bytes {
        match self {
            Self::Bedrock(tx) => tx.encode_calldata(),
            Self::Ecotone(tx) => tx.encode_calldata(),
            Self::Isthmus(tx) => tx.encode_calldata(),
        }
    }

    /// Returns the L1 [`BlockNumHash`] for the info transaction.
    pub const fn id(&self) -> BlockNumHash {
        match self {
            Self::Bedrock(tx) => BlockNumHash { number: tx.number, hash: tx.block_hash },
            Self::Ecotone(tx) => BlockNumHash { number: tx.number, hash: tx.block_hash },
            Self::Isthmus(tx) => BlockNumHash { number: tx.number, hash: tx.block_hash },
        }
    }

    /// Returns the block hash for the [`L1BlockInfoTx`].
    pub const fn block_hash(&self) -> B256 {
        self.id().hash
    }

    /// Returns the sequence number for the info transaction
    pub const fn sequence_number(&self) -> u64 {
        match self {
            Self::Bedrock(tx) => tx.sequence_number,
            Self::Ecotone(tx) => tx.sequence_number,
            Self::Isthmus(tx) => tx.sequence_number,
        }
    }

    /// Returns the batcher address for the info transaction
    pub const fn batcher_address(&self) -> Address {
        match self {
            Self::Bedrock(tx) => tx.batcher_address,
            Self::Ecotone(tx) => tx.batcher_address,
            Self::Isthmus(tx) => tx.batcher_address,
        }
    }

    /// Returns the L1 fee overhead for the info transaction. After ecotone, this value is ignored.
    pub const fn l1_fee_overhead(&self) -> U256 {
        match self {
            Self::Bedrock(tx) => tx.l1_fee_overhead,
            Self::Ecotone(_) | Self::Isthmus(_) => U256::ZERO,
        }
    }

    /// Returns the L1 fee scalar as the system config stores it.
    ///
    /// Post-Ecotone layouts carry the two scalars separately; they are packed back into a
    /// version 1 scalar word. Whether the chain set a version 0 or 1 scalar is unknowable here,
    /// and a zero blob base fee scalar gives both the same meaning.
    pub fn l1_fee_scalar(&self) -> U256 {
        let (base_fee_scalar, blob_base_fee_scalar) = match self {
            Self::Bedrock(tx) => return tx.l1_fee_scalar,
            Self::Ecotone(tx) => (tx.base_fee_scalar, tx.blob_base_fee_scalar),
            Self::Isthmus(tx) => (tx.base_fee_scalar, tx.blob_base_fee_scalar),
        };
        let mut buf = B256::ZERO;
        buf[0] = L1BlockInfoEcotone::L1_SCALAR;
        buf[24..28].copy_from_slice(blob_base_fee_scalar.to_be_bytes().as_ref());
        buf[28..32].copy_from_slice(base_fee_scalar.to_be_bytes().as_ref());
        buf.into()
    }

    /// Returns the operator fee scalar.
    pub const fn operator_fee_scalar(&self) -> u32 {
        match self {
            Self::Isthmus(tx) => tx.operator_fee_scalar,
            _ => 0,
        }
    }

    /// Returns the operator fee constant.
    pub const fn operator_fee_constant(&self) -> u64 {
        match self {
            Self::Isthmus(tx) => tx.operator_fee_constant,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RAW_BEDROCK_INFO_TX, RAW_ECOTONE_INFO_TX, RAW_ISTHMUS_INFO_TX};
    use alloc::{string::ToString, vec::Vec};
    use alloy_primitives::{address, b256};
    use rstest::rstest;

    #[test]
    fn test_l1_block_info_missing_selector() {
        assert_eq!(L1BlockInfoTx::decode_calldata(&[0x01]), Err(DecodeError::MissingSelector));
    }

    #[test]
    fn test_l1_block_info_invalid_selector() {
        assert_eq!(
            L1BlockInfoTx::decode_calldata(&[0xde, 0xad, 0xbe, 0xef]),
            Err(DecodeError::InvalidSelector)
        );
    }

    #[rstest]
    #[case::bedrock(L1BlockInfoBedrock::L1_INFO_TX_SELECTOR, "Invalid bedrock data length. Expected 260, got 6")]
    #[case::ecotone(L1BlockInfoEcotone::L1_INFO_TX_SELECTOR, "Invalid ecotone data length. Expected 164, got 6")]
    #[case::isthmus(L1BlockInfoIsthmus::L1_INFO_TX_SELECTOR, "Invalid isthmus data length. Expected 176, got 6")]
    fn test_l1_block_info_tx_invalid_len(#[case] selector: [u8; 4], #[case] message: &str) {
        let calldata = selector.into_iter().chain([0xde, 0xad]).collect::<Vec<u8>>();
        let err = L1BlockInfoTx::decode_calldata(&calldata).unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn test_decode_bedrock_variant() {
        let info = L1BlockInfoTx::decode_calldata(&RAW_BEDROCK_INFO_TX).unwrap();
        assert!(matches!(info, L1BlockInfoTx::Bedrock(_)));
        assert_eq!(
            info.id(),
            BlockNumHash {
                number: 18_334_955,
                hash: b256!("392012032675be9f94aae5ab442de73c5f4fb1bf30fa7dd0d2442239899a40fc"),
            }
        );
        assert_eq!(info.batcher_address(), address!("6887246668a3b87f54deb3b94ba47a6f63f32985"));
        assert_eq!(info.l1_fee_overhead(), U256::from(0xbc));
        assert_eq!(info.l1_fee_scalar(), U256::from(0xa6fe0));
        assert_eq!(info.operator_fee_scalar(), 0);
        assert_eq!(info.encode_calldata().as_ref(), RAW_BEDROCK_INFO_TX.as_slice());
    }

    #[test]
    fn test_ecotone_scalar_is_repacked() {
        let info = L1BlockInfoTx::decode_calldata(&RAW_ECOTONE_INFO_TX).unwrap();
        let scalar = info.l1_fee_scalar().to_be_bytes::<32>();
        assert_eq!(scalar[0], L1BlockInfoEcotone::L1_SCALAR);
        assert_eq!(u32::from_be_bytes(scalar[24..28].try_into().unwrap()), 810_949);
        assert_eq!(u32::from_be_bytes(scalar[28..32].try_into().unwrap()), 1368);
        assert_eq!(info.l1_fee_overhead(), U256::ZERO);
    }

    #[test]
    fn test_decode_isthmus_variant() {
        let info = L1BlockInfoTx::decode_calldata(&RAW_ISTHMUS_INFO_TX).unwrap();
        assert!(matches!(info, L1BlockInfoTx::Isthmus(_)));
        assert_eq!(info.sequence_number(), 5);
        assert_eq!(info.operator_fee_scalar(), 0xabcd);
        assert_eq!(info.operator_fee_constant(), 0xdcba);
    }
}
