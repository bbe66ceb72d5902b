//! Block Types

use alloy_consensus::{Block, Header, Typed2718};
use alloy_eips::BlockNumHash;
use alloy_primitives::B256;
use derive_more::Display;
use loam_genesis::ChainGenesis;
use op_alloy_consensus::OpBlock;

use crate::{DecodeError, L1BlockInfoTx};

/// Block Header Info
#[derive(Debug, Clone, Display, Copy, Eq, Hash, PartialEq, Default)]
#[display(
    "BlockInfo {{ hash: {hash}, number: {number}, parent_hash: {parent_hash}, timestamp: {timestamp} }}"
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BlockInfo {
    /// The block hash
    pub hash: B256,
    /// The block number
    pub number: u64,
    /// The parent block hash
    pub parent_hash: B256,
    /// The block timestamp
    pub timestamp: u64,
}

impl BlockInfo {
    /// Instantiates a new [`BlockInfo`].
    pub const fn new(hash: B256, number: u64, parent_hash: B256, timestamp: u64) -> Self {
        Self { hash, number, parent_hash, timestamp }
    }

    /// Returns the block ID.
    pub const fn id(&self) -> BlockNumHash {
        BlockNumHash { hash: self.hash, number: self.number }
    }

    /// Returns `true` if this [`BlockInfo`] is the direct parent of the given block.
    pub fn is_parent_of(&self, block: &Self) -> bool {
        self.number + 1 == block.number && self.hash == block.parent_hash
    }
}

impl From<&Header> for BlockInfo {
    fn from(header: &Header) -> Self {
        Self {
            hash: header.hash_slow(),
            number: header.number,
            parent_hash: header.parent_hash,
            timestamp: header.timestamp,
        }
    }
}

impl<T> From<&Block<T>> for BlockInfo {
    fn from(block: &Block<T>) -> Self {
        Self::from(&block.header)
    }
}

/// L2 Block Header Info
///
/// Blocks of one epoch share an `l1_origin`; the first block of an epoch has `seq_num == 0`
/// and every later block increments it by one.
#[derive(Debug, Display, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[display(
    "L2BlockInfo {{ block_info: {block_info}, l1_origin: {l1_origin:?}, seq_num: {seq_num} }}"
)]
pub struct L2BlockInfo {
    /// The base [`BlockInfo`]
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub block_info: BlockInfo,
    /// The L1 origin [`BlockNumHash`]
    #[cfg_attr(feature = "serde", serde(rename = "l1origin", alias = "l1Origin"))]
    pub l1_origin: BlockNumHash,
    /// The sequence number of the L2 block
    #[cfg_attr(feature = "serde", serde(rename = "sequenceNumber", alias = "seqNum"))]
    pub seq_num: u64,
}

impl L2BlockInfo {
    /// Instantiates a new [`L2BlockInfo`].
    pub const fn new(block_info: BlockInfo, l1_origin: BlockNumHash, seq_num: u64) -> Self {
        Self { block_info, l1_origin, seq_num }
    }

    /// Returns the block hash.
    pub const fn hash(&self) -> B256 {
        self.block_info.hash
    }

    /// Returns the block number.
    pub const fn number(&self) -> u64 {
        self.block_info.number
    }

    /// Returns the block ID.
    pub const fn id(&self) -> BlockNumHash {
        self.block_info.id()
    }

    /// Extracts the [`L2BlockInfo`] of an L2 block.
    ///
    /// The genesis block takes its origin from the [`ChainGenesis`]. Every other block must open
    /// with an L1 attributes deposit, which carries the L1 origin and sequence number.
    pub fn from_block_and_genesis(
        block: &OpBlock,
        genesis: &ChainGenesis,
    ) -> Result<Self, FromBlockError> {
        let block_info = BlockInfo::from(block);

        let (l1_origin, seq_num) = if block_info.number == genesis.l2.number {
            if block_info.hash != genesis.l2.hash {
                return Err(FromBlockError::InvalidGenesisHash);
            }
            (genesis.l1, 0)
        } else {
            let Some(first) = block.body.transactions.first() else {
                return Err(FromBlockError::MissingL1InfoDeposit(block_info.hash));
            };
            let Some(deposit) = first.as_deposit() else {
                return Err(FromBlockError::FirstTxNonDeposit(first.ty()));
            };

            let l1_info = L1BlockInfoTx::decode_calldata(deposit.input.as_ref())?;
            (l1_info.id(), l1_info.sequence_number())
        };

        Ok(Self { block_info, l1_origin, seq_num })
    }

    /// Builds the [`L2BlockInfo`] from a header and its already decoded L1 attributes.
    pub fn from_header_and_l1_info(header: &Header, l1_info: &L1BlockInfoTx) -> Self {
        Self {
            block_info: BlockInfo::from(header),
            l1_origin: l1_info.id(),
            seq_num: l1_info.sequence_number(),
        }
    }
}

/// An error that can occur when extracting an [`L2BlockInfo`] from an L2 block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FromBlockError {
    /// The block sits at the genesis height but its hash differs from the genesis hash.
    #[error("invalid genesis hash")]
    InvalidGenesisHash,
    /// The L2 block is missing the L1 info deposit transaction.
    #[error("L2 block is missing L1 info deposit transaction ({0})")]
    MissingL1InfoDeposit(B256),
    /// The first payload transaction is not a deposit transaction.
    #[error("first payload transaction is not a deposit transaction, type: {0}")]
    FirstTxNonDeposit(u8),
    /// The L1 info deposit calldata could not be decoded.
    #[error("failed to decode the L1 info deposit: {0}")]
    BlockInfo(#[from] DecodeError),
}

impl FromBlockError {
    /// Returns `true` if the block belongs to a different chain than the configured genesis.
    pub const fn is_chain_mismatch(&self) -> bool {
        matches!(self, Self::InvalidGenesisHash)
    }

    /// Returns `true` if the block is structurally malformed.
    pub const fn is_malformed(&self) -> bool {
        !self.is_chain_mismatch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RAW_BEDROCK_INFO_TX, RAW_ECOTONE_INFO_TX, l2_block_with_deposit};
    use alloc::{string::ToString, vec, vec::Vec};
    use alloy_consensus::{BlockBody, Signed, TxLegacy};
    use alloy_primitives::{Signature, U256, b256};
    use op_alloy_consensus::OpTxEnvelope;

    fn genesis() -> ChainGenesis {
        ChainGenesis {
            l1: BlockNumHash { number: 10, hash: B256::from([0x11; 32]) },
            l2: BlockNumHash { number: 0, hash: B256::from([0x22; 32]) },
            ..Default::default()
        }
    }

    #[test]
    fn test_from_header() {
        let header = Header {
            number: 1,
            parent_hash: B256::from([2; 32]),
            timestamp: 1,
            ..Default::default()
        };
        let block_info = BlockInfo::from(&header);
        assert_eq!(
            block_info,
            BlockInfo {
                hash: b256!("04d6fefc87466405ba0e5672dcf5c75325b33e5437da2a42423080aab8be889b"),
                number: 1,
                parent_hash: B256::from([2; 32]),
                timestamp: 1,
            }
        );
    }

    #[test]
    fn test_block_info_display() {
        let block_info = BlockInfo::new(B256::from([1; 32]), 1, B256::from([2; 32]), 1);
        assert_eq!(
            block_info.to_string(),
            "BlockInfo { hash: 0x0101010101010101010101010101010101010101010101010101010101010101, number: 1, parent_hash: 0x0202020202020202020202020202020202020202020202020202020202020202, timestamp: 1 }"
        );
    }

    #[test]
    fn test_is_parent_of() {
        let parent = BlockInfo::new(B256::from([1; 32]), 10, B256::ZERO, 1000);
        let child = BlockInfo::new(B256::from([2; 32]), 11, parent.hash, 1002);
        let unrelated = BlockInfo::new(B256::from([3; 32]), 11, B256::from([9; 32]), 1002);

        assert!(parent.is_parent_of(&child));
        assert!(!child.is_parent_of(&parent));
        assert!(!parent.is_parent_of(&unrelated));
    }

    #[test]
    fn test_from_block_genesis_matches() {
        let block = OpBlock::default();
        let mut genesis = genesis();
        genesis.l2.hash = block.header.hash_slow();

        let info = L2BlockInfo::from_block_and_genesis(&block, &genesis).unwrap();
        assert_eq!(info.l1_origin, genesis.l1);
        assert_eq!(info.seq_num, 0);
        assert_eq!(info.id(), genesis.l2);
    }

    #[test]
    fn test_from_block_genesis_hash_mismatch() {
        let block = OpBlock::default();
        let err = L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap_err();
        assert_eq!(err, FromBlockError::InvalidGenesisHash);
        assert!(err.is_chain_mismatch());
    }

    #[test]
    fn test_from_block_missing_deposit() {
        let block = OpBlock {
            header: Header { number: 1, ..Default::default() },
            body: Default::default(),
        };
        let err = L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap_err();
        assert_eq!(err, FromBlockError::MissingL1InfoDeposit(block.header.hash_slow()));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_from_block_first_tx_not_deposit() {
        let signature = Signature::new(U256::from(1), U256::from(1), false);
        let signed = Signed::new_unchecked(TxLegacy::default(), signature, B256::ZERO);
        let block = OpBlock {
            header: Header { number: 1, ..Default::default() },
            body: BlockBody {
                transactions: vec![OpTxEnvelope::Legacy(signed)],
                ommers: Vec::new(),
                withdrawals: None,
            },
        };
        let err = L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap_err();
        assert_eq!(err, FromBlockError::FirstTxNonDeposit(0));
    }

    #[test]
    fn test_from_block_bad_calldata() {
        let block = l2_block_with_deposit(1, 2, B256::ZERO, &[0xde, 0xad, 0xbe, 0xef]);
        let err = L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap_err();
        assert_eq!(err, FromBlockError::BlockInfo(DecodeError::InvalidSelector));
    }

    #[test]
    fn test_from_block_bedrock_info() {
        let block = l2_block_with_deposit(7, 14, B256::ZERO, &RAW_BEDROCK_INFO_TX);
        let info = L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap();
        assert_eq!(info.block_info.number, 7);
        assert_eq!(info.l1_origin.number, 18_334_955);
        assert_eq!(
            info.l1_origin.hash,
            b256!("392012032675be9f94aae5ab442de73c5f4fb1bf30fa7dd0d2442239899a40fc")
        );
        assert_eq!(info.seq_num, 4);
    }

    #[test]
    fn test_from_header_and_l1_info() {
        let block = l2_block_with_deposit(3, 6, B256::ZERO, &RAW_ECOTONE_INFO_TX);
        let l1_info = L1BlockInfoTx::decode_calldata(&RAW_ECOTONE_INFO_TX).unwrap();
        let from_header = L2BlockInfo::from_header_and_l1_info(&block.header, &l1_info);
        let from_block = L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap();
        assert_eq!(from_header, from_block);
        assert_eq!(from_header.seq_num, 5);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_deserialize_l2_block_info() {
        let l2_block_info = L2BlockInfo {
            block_info: BlockInfo {
                hash: B256::from([1; 32]),
                number: 1,
                parent_hash: B256::from([2; 32]),
                timestamp: 1,
            },
            l1_origin: BlockNumHash { hash: B256::from([3; 32]), number: 2 },
            seq_num: 3,
        };

        let json = r#"{
            "hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
            "number": 1,
            "parentHash": "0x0202020202020202020202020202020202020202020202020202020202020202",
            "timestamp": 1,
            "l1origin": {
                "hash": "0x0303030303030303030303030303030303030303030303030303030303030303",
                "number": 2
            },
            "sequenceNumber": 3
        }"#;

        let deserialized: L2BlockInfo = serde_json::from_str(json).unwrap();
        assert_eq!(deserialized, l2_block_info);
    }

    proptest::proptest! {
        #[test]
        fn test_extracted_epochs_are_monotonic(
            epoch_lengths in proptest::collection::vec(1u64..5, 1..12),
        ) {
            use crate::L1BlockInfoEcotone;

            let mut chain = Vec::new();
            let mut number = 1;
            for (epoch, len) in epoch_lengths.iter().enumerate() {
                let origin = epoch as u64 + 100;
                for seq in 0..*len {
                    let l1_info = L1BlockInfoEcotone {
                        number: origin,
                        block_hash: B256::left_padding_from(&origin.to_be_bytes()),
                        sequence_number: seq,
                        ..Default::default()
                    };
                    let block = l2_block_with_deposit(
                        number,
                        number * 2,
                        B256::ZERO,
                        &l1_info.encode_calldata(),
                    );
                    chain.push(L2BlockInfo::from_block_and_genesis(&block, &genesis()).unwrap());
                    number += 1;
                }
            }

            for pair in chain.windows(2) {
                let (parent, child) = (pair[0], pair[1]);
                proptest::prop_assert!(parent.l1_origin.number <= child.l1_origin.number);
                if child.l1_origin.number > parent.l1_origin.number {
                    proptest::prop_assert_eq!(child.seq_num, 0);
                } else {
                    proptest::prop_assert_eq!(child.l1_origin, parent.l1_origin);
                    proptest::prop_assert_eq!(child.seq_num, parent.seq_num + 1);
                }
            }
        }
    }
}
