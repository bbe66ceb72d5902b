//! Isthmus L1 Block Info transaction types.

use alloc::vec::Vec;
use alloy_primitives::{Address, B256, Bytes, U256};

use super::read_array;
use crate::DecodeError;

/// Represents the fields within an Isthmus L1 block info transaction.
///
/// Isthmus Binary Format
/// +---------+--------------------------+
/// | Bytes   | Field                    |
/// +---------+--------------------------+
/// | 4       | Function signature       |
/// | 4       | BaseFeeScalar            |
/// | 4       | BlobBaseFeeScalar        |
/// | 8       | SequenceNumber           |
/// | 8       | Timestamp                |
/// | 8       | L1BlockNumber            |
/// | 32      | BaseFee                  |
/// | 32      | BlobBaseFee              |
/// | 32      | BlockHash                |
/// | 32      | BatcherHash              |
/// | 4       | OperatorFeeScalar        |
/// | 8       | OperatorFeeConstant      |
/// +---------+--------------------------+
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1BlockInfoIsthmus {
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
    /// The current blob base fee on L1
    pub blob_base_fee: u128,
    /// The fee scalar for L1 blobspace data
    pub blob_base_fee_scalar: u32,
    /// The fee scalar for L1 data
    pub base_fee_scalar: u32,
    /// The operator fee scalar
    pub operator_fee_scalar: u32,
    /// The operator fee constant
    pub operator_fee_constant: u64,
}

impl L1BlockInfoIsthmus {
    /// The length of an L1 info transaction in Isthmus.
    pub const L1_INFO_TX_LEN: usize = 4 + 32 * 5 + 4 + 8;

    /// The 4 byte selector of "setL1BlockValuesIsthmus()"
    pub const L1_INFO_TX_SELECTOR: [u8; 4] = [0x09, 0x89, 0x99, 0xbe];

    /// Encodes the [`L1BlockInfoIsthmus`] object into Ethereum transaction calldata.
    pub fn encode_calldata(&self) -> Bytes {
        let mut buf = Vec::with_capacity(Self::L1_INFO_TX_LEN);
        buf.extend_from_slice(Self::L1_INFO_TX_SELECTOR.as_ref());
        buf.extend_from_slice(self.base_fee_scalar.to_be_bytes().as_ref());
        buf.extend_from_slice(self.blob_base_fee_scalar.to_be_bytes().as_ref());
        buf.extend_from_slice(self.sequence_number.to_be_bytes().as_ref());
        buf.extend_from_slice(self.time.to_be_bytes().as_ref());
        buf.extend_from_slice(self.number.to_be_bytes().as_ref());
        buf.extend_from_slice(U256::from(self.base_fee).to_be_bytes::<{ U256::BYTES }>().as_ref());
        buf.extend_from_slice(
            U256::from(self.blob_base_fee).to_be_bytes::<{ U256::BYTES }>().as_ref(),
        );
        buf.extend_from_slice(self.block_hash.as_ref());
        buf.extend_from_slice(self.batcher_address.into_word().as_ref());
        buf.extend_from_slice(self.operator_fee_scalar.to_be_bytes().as_ref());
        buf.extend_from_slice(self.operator_fee_constant.to_be_bytes().as_ref());
        buf.into()
    }

    /// Decodes the [`L1BlockInfoIsthmus`] object from ethereum transaction calldata.
    pub fn decode_calldata(r: &[u8]) -> Result<Self, DecodeError> {
        if r.len() != Self::L1_INFO_TX_LEN {
            return Err(DecodeError::InvalidIsthmusLength(Self::L1_INFO_TX_LEN, r.len()));
        }

        Ok(Self {
            base_fee_scalar: u32::from_be_bytes(read_array(r, 4)),
            blob_base_fee_scalar: u32::from_be_bytes(read_array(r, 8)),
            sequence_number: u64::from_be_bytes(read_array(r, 12)),
            time: u64::from_be_bytes(read_array(r, 20)),
            number: u64::from_be_bytes(read_array(r, 28)),
            base_fee: u64::from_be_bytes(read_array(r, 60)),
            blob_base_fee: u128::from_be_bytes(read_array(r, 84)),
            block_hash: B256::from_slice(&r[100..132]),
            batcher_address: Address::from_slice(&r[144..164]),
            operator_fee_scalar: u32::from_be_bytes(read_array(r, 164)),
            operator_fee_constant: u64::from_be_bytes(read_array(r, 168)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RAW_ISTHMUS_INFO_TX;
    use alloc::vec;

    #[test]
    fn test_decode_calldata_isthmus_invalid_length() {
        let r = vec![0u8; 1];
        assert_eq!(
            L1BlockInfoIsthmus::decode_calldata(&r),
            Err(DecodeError::InvalidIsthmusLength(L1BlockInfoIsthmus::L1_INFO_TX_LEN, r.len()))
        );
    }

    #[test]
    fn test_decode_isthmus_operator_fee() {
        let info = L1BlockInfoIsthmus::decode_calldata(&RAW_ISTHMUS_INFO_TX).unwrap();
        assert_eq!(info.sequence_number, 5);
        assert_eq!(info.operator_fee_scalar, 0xabcd);
        assert_eq!(info.operator_fee_constant, 0xdcba);
        assert_eq!(info.encode_calldata().as_ref(), RAW_ISTHMUS_INFO_TX.as_slice());
    }
}
