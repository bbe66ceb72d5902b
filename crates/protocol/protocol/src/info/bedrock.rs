//! Contains bedrock-specific L1 block info types.

use alloc::vec::Vec;
use alloy_primitives::{Address, B256, Bytes, U256};

use super::read_array;
use crate::DecodeError;

/// Represents the fields within a Bedrock L1 block info transaction.
///
/// Bedrock Binary Format
// +---------+--------------------------+
// | Bytes   | Field                    |
// +---------+--------------------------+
// | 4       | Function signature       |
// | 32      | Number                   |
// | 32      | Time                     |
// | 32      | BaseFee                  |
// | 32      | BlockHash                |
// | 32      | SequenceNumber           |
// | 32      | BatcherHash              |
// | 32      | L1FeeOverhead            |
// | 32      | L1FeeScalar              |
// +---------+--------------------------+
#[derive(Debug, Clone, Hash, Eq, PartialEq, Default, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1BlockInfoBedrock {
    /// The current L1 origin block number
    pub number: u64,
    /// The current L1 origin block's timestamp
    pub time: u64,
    /// The current L1 origin block's basefee
    pub base_fee: u64,
    /// The current L1 origin block's hash
    pub block_hash: B256,
    /// The current sequence number
    pub sequence_number: u64,
    /// The address of the batch submitter
    pub batcher_address: Address,
    /// The fee overhead for L1 data
    pub l1_fee_overhead: U256,
    /// The fee scalar for L1 data
    pub l1_fee_scalar: U256,
}

impl L1BlockInfoBedrock {
    /// The length of an L1 info transaction in Bedrock.
    pub const L1_INFO_TX_LEN: usize = 4 + 32 * 8;

    /// The 4 byte selector of the
    /// "setL1BlockValues(uint64,uint64,uint256,bytes32,uint64,bytes32,uint256,uint256)" function
    pub const L1_INFO_TX_SELECTOR: [u8; 4] = [0x01, 0x5d, 0x8e, 0xb9];

    /// Encodes the [`L1BlockInfoBedrock`] object into Ethereum transaction calldata.
    pub fn encode_calldata(&self) -> Bytes {
        let mut buf = Vec::with_capacity(Self::L1_INFO_TX_LEN);
        buf.extend_from_slice(Self::L1_INFO_TX_SELECTOR.as_ref());
        buf.extend_from_slice(U256::from(self.number).to_be_bytes::<32>().as_slice());
        buf.extend_from_slice(U256::from(self.time).to_be_bytes::<32>().as_slice());
        buf.extend_from_slice(U256::from(self.base_fee).to_be_bytes::<32>().as_slice());
        buf.extend_from_slice(self.block_hash.as_slice());
        buf.extend_from_slice(U256::from(self.sequence_number).to_be_bytes::<32>().as_slice());
        buf.extend_from_slice(self.batcher_address.into_word().as_slice());
        buf.extend_from_slice(self.l1_fee_overhead.to_be_bytes::<32>().as_slice());
        buf.extend_from_slice(self.l1_fee_scalar.to_be_bytes::<32>().as_slice());
        buf.into()
    }

    /// Decodes the [`L1BlockInfoBedrock`] object from ethereum transaction calldata.
    ///
    /// Only the low 8 bytes of the number, time, base fee and sequence number words are read.
    pub fn decode_calldata(r: &[u8]) -> Result<Self, DecodeError> {
        if r.len() != Self::L1_INFO_TX_LEN {
            return Err(DecodeError::InvalidBedrockLength(Self::L1_INFO_TX_LEN, r.len()));
        }

        Ok(Self {
            number: u64::from_be_bytes(read_array(r, 28)),
            time: u64::from_be_bytes(read_array(r, 60)),
            base_fee: u64::from_be_bytes(read_array(r, 92)),
            block_hash: B256::from_slice(&r[100..132]),
            sequence_number: u64::from_be_bytes(read_array(r, 156)),
            batcher_address: Address::from_slice(&r[176..196]),
            l1_fee_overhead: U256::from_be_slice(&r[196..228]),
            l1_fee_scalar: U256::from_be_slice(&r[228..260]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RAW_BEDROCK_INFO_TX;
    use alloc::vec;
    use alloy_primitives::{address, b256, uint};

    #[test]
    fn test_decode_calldata_bedrock_invalid_length() {
        let r = vec![0u8; 1];
        assert_eq!(
            L1BlockInfoBedrock::decode_calldata(&r),
            Err(DecodeError::InvalidBedrockLength(L1BlockInfoBedrock::L1_INFO_TX_LEN, r.len()))
        );
    }

    #[test]
    fn test_decode_bedrock_reference_tx() {
        let info = L1BlockInfoBedrock::decode_calldata(&RAW_BEDROCK_INFO_TX).unwrap();
        assert_eq!(
            info,
            L1BlockInfoBedrock {
                number: 18_334_955,
                time: 1_697_121_143,
                base_fee: 10_419_034_451,
                block_hash: b256!(
                    "392012032675be9f94aae5ab442de73c5f4fb1bf30fa7dd0d2442239899a40fc"
                ),
                sequence_number: 4,
                batcher_address: address!("6887246668a3b87f54deb3b94ba47a6f63f32985"),
                l1_fee_overhead: uint!(0xbc_U256),
                l1_fee_scalar: uint!(0xa6fe0_U256),
            }
        );
        assert_eq!(info.encode_calldata().as_ref(), RAW_BEDROCK_INFO_TX.as_slice());
    }
}
